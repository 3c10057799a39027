//! Entry checks shared by all detectors
//!
//! Every check runs before a scan starts, so a failing call produces no
//! partial output.

use forage_core::Similarity;
use forage_ports::{SwitchError, SwitchResult};

/// Parameter must be a number within [0, 1]
pub(crate) fn unit_interval(name: &'static str, value: f64) -> SwitchResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SwitchError::InvalidParameter { name, value })
    }
}

pub(crate) fn non_empty(len: usize) -> SwitchResult<()> {
    if len == 0 {
        Err(SwitchError::EmptySequence)
    } else {
        Ok(())
    }
}

/// Auxiliary series must have one entry per item
pub(crate) fn same_length(
    series: &'static str,
    values: &[Similarity],
    expected: usize,
) -> SwitchResult<()> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(SwitchError::DimensionMismatch {
            series,
            expected,
            actual: values.len(),
        })
    }
}
