//! Forage Switch Detection
//!
//! Independent switch heuristics for verbal fluency lists. Each one maps an
//! ordered list of items (plus the auxiliary data it needs) to a
//! [`Classification`] of the same length, with position 0 always a boundary.
//!
//! | method              | reads                          | rule                                   |
//! |---------------------|--------------------------------|----------------------------------------|
//! | `simdrop`           | semantic series                | strict local minimum                   |
//! | `norms`             | category norms                 | no shared category with predecessor    |
//! | `norms_categorical` | category norms                 | no shared category with whole cluster  |
//! | `multimodal`        | semantic + phonological series | local minimum of blended series        |
//! | `delta`             | semantic series                | two-state machine on z-scored deltas   |
//! | `multimodaldelta`   | semantic + phonological series | two-state machine on blended series    |
//! | `svd_gtom`          | SVD cluster assignment         | adjacent pair not jointly clustered    |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forage_switch::{create_switch_detector, SwitchMethod};
//! use forage_ports::FluencyInput;
//!
//! let detector = create_switch_detector(&SwitchMethod::Delta {
//!     rise_thresh: 0.75,
//!     fall_thresh: 0.75,
//! })?;
//! let input = FluencyInput::new(&items).with_semantic(&history.semantic);
//! let switches = detector.detect(&input)?;
//! ```
//!
//! Every call is a deterministic left-to-right scan with no shared state, so
//! different subjects can be classified in parallel.

mod delta;
mod method;
mod multimodal;
mod norms;
mod simdrop;
mod svd_gtom;
mod validate;

pub use delta::{
    DeltaSimilarity, MultimodalDelta, median, switch_delta, switch_multimodaldelta, zscore,
};
pub use method::{
    DELTA, MULTIMODAL, MULTIMODAL_DELTA, NORMS, NORMS_CATEGORICAL, SIMDROP, SVD_GTOM,
    SwitchMethod,
};
pub use multimodal::{MultimodalSimDrop, blend, switch_multimodal};
pub use norms::{CategoricalNorms, TroyerNorms, switch_norms, switch_norms_categorical};
pub use simdrop::{SimDrop, switch_simdrop};
pub use svd_gtom::{SvdGtom, switch_svd_gtom};

// Re-export the port and domain types for convenience
pub use forage_core::{Classification, SwitchCode};
pub use forage_ports::{FluencyInput, SwitchDetector, SwitchError, SwitchResult};

/// Factory function to create switch detectors from a method description
pub fn create_switch_detector(method: &SwitchMethod) -> SwitchResult<Box<dyn SwitchDetector>> {
    method.build()
}
