use serde::{Deserialize, Serialize};

/// Per-step designation from the response-time curve fit
///
/// Shares the 0/1/2 numbering with [`SwitchCode`](super::SwitchCode) but means
/// something else: 0 is "the model predicts a larger step than observed", not
/// "no event". Keep the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TimingCode {
    /// Fitted slope exceeds the raw slope (response came faster than the model)
    FasterThanModel = 0,
    /// Raw slope is at least the fitted slope (response came slower than the model)
    SlowerThanModel = 1,
    /// First response, no preceding step
    Boundary = 2,
}

impl TimingCode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Timing designations for one response-time series
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimingClassification(Vec<TimingCode>);

impl TimingClassification {
    pub fn new(codes: Vec<TimingCode>) -> Self {
        Self(codes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn codes(&self) -> &[TimingCode] {
        &self.0
    }

    pub fn to_codes(&self) -> Vec<u8> {
        self.0.iter().map(|code| code.code()).collect()
    }

    pub fn count(&self, code: TimingCode) -> usize {
        self.0.iter().filter(|c| **c == code).count()
    }
}

impl FromIterator<TimingCode> for TimingClassification {
    fn from_iter<I: IntoIterator<Item = TimingCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
