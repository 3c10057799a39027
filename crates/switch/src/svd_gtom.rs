//! SVD-GTOM
//!
//! Sung et al. (2013): adjacent items that the precomputed SVD clustering
//! groups together under a GTOM threshold continue a cluster, any other
//! adjacent pair is a switch. All similarity work lives behind the
//! [`ClusterMembership`] port.

use forage_core::{Classification, Item, SwitchCode};
use forage_ports::{ClusterMembership, FluencyInput, SwitchDetector, SwitchResult};

use crate::method::SVD_GTOM;
use crate::validate;

/// Switch wherever an adjacent pair is not jointly clustered
pub fn switch_svd_gtom(
    items: &[Item],
    clusters: &dyn ClusterMembership,
    gtom_threshold: f64,
) -> SwitchResult<Classification> {
    validate::non_empty(items.len())?;

    let mut classification = Classification::with_capacity(items.len());
    classification.push(SwitchCode::Boundary);
    for pair in items.windows(2) {
        let current = (pair[1].as_str(), pair[0].as_str());
        let clustered = clusters.gtom_clustered(current, gtom_threshold);
        classification.push(SwitchCode::from_switch(!clustered));
    }
    Ok(classification)
}

/// SVD-GTOM detector with a fixed threshold
#[derive(Debug, Clone, Copy)]
pub struct SvdGtom {
    threshold: f64,
}

impl SvdGtom {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl SwitchDetector for SvdGtom {
    fn detect(&self, input: &FluencyInput<'_>) -> SwitchResult<Classification> {
        switch_svd_gtom(
            input.items,
            input.require_clusters(SVD_GTOM)?,
            self.threshold,
        )
    }

    fn name(&self) -> &str {
        SVD_GTOM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Clustered iff both items start with the same letter; records queries
    struct FirstLetter {
        queries: Mutex<Vec<(String, String, f64)>>,
    }

    impl ClusterMembership for FirstLetter {
        fn gtom_clustered(&self, pair: (&str, &str), threshold: f64) -> bool {
            self.queries
                .lock()
                .unwrap()
                .push((pair.0.to_string(), pair.1.to_string(), threshold));
            pair.0.chars().next() == pair.1.chars().next()
        }
    }

    fn list(words: &[&str]) -> Vec<Item> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_adjacent_pairs_queried_in_order() {
        let oracle = FirstLetter {
            queries: Mutex::new(Vec::new()),
        };
        let items = list(&["cat", "cow", "dog", "deer"]);
        let result = switch_svd_gtom(&items, &oracle, 0.3).unwrap();
        assert_eq!(result.to_codes(), vec![2, 0, 1, 0]);

        let queries = oracle.queries.lock().unwrap();
        assert_eq!(queries.len(), 3);
        assert_eq!(queries[0], ("cow".to_string(), "cat".to_string(), 0.3));
    }

    #[test]
    fn test_detector_with_threshold() {
        let oracle = FirstLetter {
            queries: Mutex::new(Vec::new()),
        };
        let items = list(&["ant"]);
        let input = FluencyInput::new(&items).with_clusters(&oracle);
        assert_eq!(SvdGtom::new(0.5).detect(&input).unwrap().to_codes(), vec![2]);
        assert!(oracle.queries.lock().unwrap().is_empty());
    }
}
