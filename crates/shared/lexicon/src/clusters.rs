use std::collections::HashMap;

use forage_core::Item;
use forage_ports::ClusterMembership;
use serde::{Deserialize, Serialize};

/// Precomputed SVD cluster assignment
///
/// Each item carries a loading per cluster. Two items are jointly clustered
/// under a GTOM threshold when some cluster loads both of them at or above
/// the threshold.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SvdClusters {
    loadings: HashMap<Item, HashMap<usize, f64>>,
}

impl SvdClusters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the loading of `item` on `cluster`
    pub fn assign(&mut self, item: impl Into<Item>, cluster: usize, loading: f64) {
        self.loadings
            .entry(item.into())
            .or_default()
            .insert(cluster, loading);
    }

    /// Builder form of [`assign`](Self::assign)
    pub fn with(mut self, item: impl Into<Item>, cluster: usize, loading: f64) -> Self {
        self.assign(item, cluster, loading);
        self
    }

    /// Loading of `item` on `cluster`, if assigned
    pub fn loading(&self, item: &str, cluster: usize) -> Option<f64> {
        self.loadings.get(item)?.get(&cluster).copied()
    }

    pub fn len(&self) -> usize {
        self.loadings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loadings.is_empty()
    }
}

impl ClusterMembership for SvdClusters {
    fn gtom_clustered(&self, pair: (&str, &str), threshold: f64) -> bool {
        let Some(first) = self.loadings.get(pair.0) else {
            return false;
        };
        first.iter().any(|(cluster, loading)| {
            *loading >= threshold
                && self
                    .loading(pair.1, *cluster)
                    .is_some_and(|other| other >= threshold)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusters() -> SvdClusters {
        SvdClusters::new()
            .with("cow", 0, 0.9)
            .with("pig", 0, 0.7)
            .with("pig", 1, 0.4)
            .with("shark", 1, 0.8)
    }

    #[test]
    fn test_shared_cluster_above_threshold() {
        let clusters = clusters();
        assert!(clusters.gtom_clustered(("cow", "pig"), 0.5));
        assert!(clusters.gtom_clustered(("pig", "cow"), 0.5));
        assert!(!clusters.gtom_clustered(("cow", "pig"), 0.8));
    }

    #[test]
    fn test_weak_loading_does_not_cluster() {
        let clusters = clusters();
        assert!(!clusters.gtom_clustered(("pig", "shark"), 0.5));
        assert!(clusters.gtom_clustered(("pig", "shark"), 0.3));
    }

    #[test]
    fn test_unknown_items_are_not_clustered() {
        assert!(!clusters().gtom_clustered(("cow", "yak"), 0.0));
    }
}
