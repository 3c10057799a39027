use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::SwitchCode;

/// Switch designations for one fluency list, one code per item
///
/// Every detector returns a classification with exactly as many positions as
/// its input list, and position 0 is always [`SwitchCode::Boundary`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classification(Vec<SwitchCode>);

impl Classification {
    /// Wrap an already computed code sequence
    pub fn new(codes: Vec<SwitchCode>) -> Self {
        Self(codes)
    }

    /// Create an empty classification with room for `len` codes
    pub fn with_capacity(len: usize) -> Self {
        Self(Vec::with_capacity(len))
    }

    /// Append the code for the next position
    pub fn push(&mut self, code: SwitchCode) {
        self.0.push(code);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn codes(&self) -> &[SwitchCode] {
        &self.0
    }

    /// Numeric form (0 = no switch, 1 = switch, 2 = boundary)
    pub fn to_codes(&self) -> Vec<u8> {
        self.0.iter().map(|code| code.code()).collect()
    }

    /// Count positions carrying `code`
    pub fn count(&self, code: SwitchCode) -> usize {
        self.0.iter().filter(|c| **c == code).count()
    }

    /// Positions where a new cluster starts
    pub fn switch_positions(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, code)| code.is_switch())
            .map(|(position, _)| position)
            .collect()
    }

    /// Sizes of the clusters delimited by switches and boundaries
    ///
    /// A cluster starts at a Switch or Boundary position and runs until the
    /// next one. A trailing Boundary (windowed methods) closes the list rather
    /// than opening a cluster, so it is counted with the preceding cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        let last = self.0.len().saturating_sub(1);
        for (position, code) in self.0.iter().enumerate() {
            let opens = match code {
                SwitchCode::Switch => true,
                SwitchCode::Boundary => position == 0 || position != last,
                SwitchCode::NoSwitch => false,
            };
            match sizes.last_mut() {
                Some(size) if !opens => *size += 1,
                _ => sizes.push(1),
            }
        }
        sizes
    }
}

impl From<Vec<SwitchCode>> for Classification {
    fn from(codes: Vec<SwitchCode>) -> Self {
        Self(codes)
    }
}

impl FromIterator<SwitchCode> for Classification {
    fn from_iter<I: IntoIterator<Item = SwitchCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for Classification {
    type Output = SwitchCode;

    fn index(&self, position: usize) -> &Self::Output {
        &self.0[position]
    }
}

impl IntoIterator for Classification {
    type Item = SwitchCode;
    type IntoIter = std::vec::IntoIter<SwitchCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
