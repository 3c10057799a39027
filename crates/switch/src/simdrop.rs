//! Similarity Drop
//!
//! Hills, Jones & Todd (2012): within items A, B, C, D a switch is predicted
//! at C when S(A,B) > S(B,C) < S(C,D), i.e. the similarity to the preceding
//! item is a strict local minimum.

use forage_core::{Classification, Item, Similarity, SwitchCode};
use forage_ports::{FluencyInput, SwitchDetector, SwitchResult};

use crate::method::SIMDROP;
use crate::validate;

/// Classify by strict local minima of the semantic series
pub fn switch_simdrop(items: &[Item], semantic: &[Similarity]) -> SwitchResult<Classification> {
    validate::non_empty(items.len())?;
    validate::same_length("semantic similarity series", semantic, items.len())?;
    Ok(local_minima(semantic))
}

/// Switch at every interior strict local minimum
///
/// First and last positions are boundaries; ties never count as a drop.
pub(crate) fn local_minima(series: &[Similarity]) -> Classification {
    let len = series.len();
    (0..len)
        .map(|k| {
            if k > 0 && k + 1 < len {
                SwitchCode::from_switch(series[k + 1] > series[k] && series[k - 1] > series[k])
            } else {
                SwitchCode::Boundary
            }
        })
        .collect()
}

/// Similarity-drop detector over the semantic series
#[derive(Debug, Clone, Copy, Default)]
pub struct SimDrop;

impl SimDrop {
    pub fn new() -> Self {
        Self
    }
}

impl SwitchDetector for SimDrop {
    fn detect(&self, input: &FluencyInput<'_>) -> SwitchResult<Classification> {
        switch_simdrop(input.items, input.require_semantic(SIMDROP)?)
    }

    fn name(&self) -> &str {
        SIMDROP
    }
}
