use forage_core::{Classification, Item, Similarity};

use crate::error::{SwitchError, SwitchResult};
use crate::resources::{CategoryResolver, ClusterMembership};

/// Everything a detector may read for one fluency list
///
/// Only `items` is mandatory. Each detector declares which auxiliary inputs it
/// needs and fails with [`SwitchError::MissingInput`] if they are absent.
#[derive(Clone, Copy)]
pub struct FluencyInput<'a> {
    pub items: &'a [Item],
    pub semantic: Option<&'a [Similarity]>,
    pub phonological: Option<&'a [Similarity]>,
    pub norms: Option<&'a dyn CategoryResolver>,
    pub clusters: Option<&'a dyn ClusterMembership>,
}

impl<'a> FluencyInput<'a> {
    pub fn new(items: &'a [Item]) -> Self {
        Self {
            items,
            semantic: None,
            phonological: None,
            norms: None,
            clusters: None,
        }
    }

    pub fn with_semantic(mut self, semantic: &'a [Similarity]) -> Self {
        self.semantic = Some(semantic);
        self
    }

    pub fn with_phonological(mut self, phonological: &'a [Similarity]) -> Self {
        self.phonological = Some(phonological);
        self
    }

    pub fn with_norms(mut self, norms: &'a dyn CategoryResolver) -> Self {
        self.norms = Some(norms);
        self
    }

    pub fn with_clusters(mut self, clusters: &'a dyn ClusterMembership) -> Self {
        self.clusters = Some(clusters);
        self
    }

    /// Semantic series, or `MissingInput` naming `detector`
    pub fn require_semantic(&self, detector: &'static str) -> SwitchResult<&'a [Similarity]> {
        self.semantic.ok_or(SwitchError::MissingInput {
            detector,
            input: "semantic similarity series",
        })
    }

    pub fn require_phonological(&self, detector: &'static str) -> SwitchResult<&'a [Similarity]> {
        self.phonological.ok_or(SwitchError::MissingInput {
            detector,
            input: "phonological similarity series",
        })
    }

    pub fn require_norms(&self, detector: &'static str) -> SwitchResult<&'a dyn CategoryResolver> {
        self.norms.ok_or(SwitchError::MissingInput {
            detector,
            input: "category norms",
        })
    }

    pub fn require_clusters(
        &self,
        detector: &'static str,
    ) -> SwitchResult<&'a dyn ClusterMembership> {
        self.clusters.ok_or(SwitchError::MissingInput {
            detector,
            input: "SVD cluster assignment",
        })
    }
}

/// Port for switch detection algorithms
///
/// Different implementations encode different switch heuristics:
/// - Similarity drop (local minimum of adjacent similarity)
/// - Category norms (pairwise or running-cluster)
/// - Delta similarity (two-state machine over z-scored similarity)
/// - SVD/GTOM cluster membership
///
/// Parameters are validated when the detector is built, so `detect` only fails
/// on missing or mismatched inputs.
pub trait SwitchDetector: Send + Sync {
    /// Classify every position of the fluency list
    fn detect(&self, input: &FluencyInput<'_>) -> SwitchResult<Classification>;

    /// Get the name of the method
    fn name(&self) -> &str;
}
