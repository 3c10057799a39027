//! Forage Ports
//!
//! Port definitions (traits) for verbal fluency switch detection.
//! These define the boundaries between the detectors and the lexical
//! resources they consume, which are built elsewhere and passed in fully
//! materialized.

mod detector;
mod error;
mod resources;

pub use detector::{FluencyInput, SwitchDetector};
pub use error::{
    FitError, FitResult, LexiconError, LexiconResult, SwitchError, SwitchResult,
};
pub use resources::{CategoryResolver, ClusterMembership, LexicalResource, SimilarityKind};
