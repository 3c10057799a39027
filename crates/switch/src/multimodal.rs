//! Multimodal Similarity Drop
//!
//! Extends the similarity-drop heuristic with phonological cues: the two
//! similarity series are blended with weight `alpha` on the semantic side
//! before looking for local minima.

use forage_core::{Classification, Item, Similarity};
use forage_ports::{FluencyInput, SwitchDetector, SwitchResult};

use crate::method::MULTIMODAL;
use crate::simdrop::local_minima;
use crate::validate;

/// `alpha * semantic + (1 - alpha) * phonological`, element-wise
pub fn blend(semantic: &[Similarity], phonological: &[Similarity], alpha: f64) -> Vec<Similarity> {
    semantic
        .iter()
        .zip(phonological)
        .map(|(sem, phon)| alpha * sem + (1.0 - alpha) * phon)
        .collect()
}

/// Similarity drop over the blended semantic/phonological series
pub fn switch_multimodal(
    items: &[Item],
    semantic: &[Similarity],
    phonological: &[Similarity],
    alpha: f64,
) -> SwitchResult<Classification> {
    validate::unit_interval("alpha", alpha)?;
    validate::non_empty(items.len())?;
    validate::same_length("semantic similarity series", semantic, items.len())?;
    validate::same_length("phonological similarity series", phonological, items.len())?;

    Ok(local_minima(&blend(semantic, phonological, alpha)))
}

/// Multimodal similarity-drop detector
#[derive(Debug, Clone, Copy)]
pub struct MultimodalSimDrop {
    alpha: f64,
}

impl MultimodalSimDrop {
    /// Create the detector; `alpha` must be within [0, 1]
    pub fn new(alpha: f64) -> SwitchResult<Self> {
        validate::unit_interval("alpha", alpha)?;
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl SwitchDetector for MultimodalSimDrop {
    fn detect(&self, input: &FluencyInput<'_>) -> SwitchResult<Classification> {
        switch_multimodal(
            input.items,
            input.require_semantic(MULTIMODAL)?,
            input.require_phonological(MULTIMODAL)?,
            self.alpha,
        )
    }

    fn name(&self) -> &str {
        MULTIMODAL
    }
}
