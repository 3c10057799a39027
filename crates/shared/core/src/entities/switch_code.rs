use serde::{Deserialize, Serialize};

/// Per-position switch designation
///
/// The numeric coding is shared by every switch detector and by the
/// downstream foraging models that consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SwitchCode {
    /// Item continues the current cluster
    NoSwitch = 0,
    /// Item starts a new cluster
    Switch = 1,
    /// Not enough context to decide (first item, or last item for windowed methods)
    Boundary = 2,
}

impl SwitchCode {
    /// Numeric code (0, 1 or 2)
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Map a switch flag to a code
    pub fn from_switch(is_switch: bool) -> Self {
        if is_switch {
            SwitchCode::Switch
        } else {
            SwitchCode::NoSwitch
        }
    }

    /// Returns true if the position starts a new cluster
    pub fn is_switch(&self) -> bool {
        matches!(self, SwitchCode::Switch)
    }
}
