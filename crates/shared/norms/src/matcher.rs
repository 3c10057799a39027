use dashmap::DashMap;
use forage_core::{CategoryNorms, CategorySet, Item};
use forage_ports::CategoryResolver;
use log::debug;

use crate::ratio::close_match;

/// Default acceptance cutoff for fuzzy matches
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Fuzzy matcher over a category norms table
///
/// The table is loaded once by the caller and handed over; resolved labels are
/// cached so repeated lookups across a batch of subjects stay cheap. The cache
/// is concurrent, so one matcher can be shared by parallel workers.
pub struct NormMatcher {
    norms: CategoryNorms,
    cutoff: f64,
    resolved: DashMap<Item, Item>,
}

impl NormMatcher {
    /// Create a matcher with the default cutoff
    pub fn new(norms: CategoryNorms) -> Self {
        Self::with_cutoff(norms, DEFAULT_CUTOFF)
    }

    /// Create a matcher with a custom acceptance cutoff
    pub fn with_cutoff(norms: CategoryNorms, cutoff: f64) -> Self {
        Self {
            norms,
            cutoff,
            resolved: DashMap::new(),
        }
    }

    pub fn norms(&self) -> &CategoryNorms {
        &self.norms
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Closest canonical label for `label`
    ///
    /// Returns `label` unchanged when nothing scores at least the cutoff.
    pub fn resolve(&self, label: &str) -> Item {
        if self.norms.contains(label) {
            return label.to_string();
        }
        if let Some(hit) = self.resolved.get(label) {
            return hit.value().clone();
        }

        let resolved = close_match(label, self.norms.items(), self.cutoff)
            .unwrap_or(label)
            .to_string();
        self.resolved.insert(label.to_string(), resolved.clone());
        resolved
    }

    /// Categories of an already resolved label
    pub fn categories(&self, resolved: &str) -> CategorySet {
        self.norms.categories(resolved)
    }

    /// Number of cached fuzzy resolutions
    pub fn cached(&self) -> usize {
        self.resolved.len()
    }
}

impl CategoryResolver for NormMatcher {
    fn resolve_categories(&self, label: &str) -> CategorySet {
        let resolved = self.resolve(label);
        let categories = self.categories(&resolved);
        if !categories.is_known() {
            debug!("No norms entry for '{}'", label);
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal_norms() -> CategoryNorms {
        CategoryNorms::from_pairs([
            ("grape", "Fruit"),
            ("cow", "Farm"),
            ("pig", "Farm"),
            ("chicken", "Farm"),
            ("chicken", "Birds"),
            ("owl", "Birds"),
            ("guinea pig", "Pets"),
        ])
    }

    #[test]
    fn test_exact_match_skips_cache() {
        let matcher = NormMatcher::new(animal_norms());
        assert_eq!(matcher.resolve("cow"), "cow");
        assert_eq!(matcher.cached(), 0);
    }

    #[test]
    fn test_fuzzy_match_resolves_and_caches() {
        let matcher = NormMatcher::new(animal_norms());
        assert_eq!(matcher.resolve("grapes"), "grape");
        assert_eq!(matcher.resolve("guinea pigs"), "guinea pig");
        assert_eq!(matcher.cached(), 2);

        // Second lookup is served from the cache
        assert_eq!(matcher.resolve("grapes"), "grape");
        assert_eq!(matcher.cached(), 2);
    }

    #[test]
    fn test_unmatched_label_returned_unchanged() {
        let matcher = NormMatcher::new(animal_norms());
        assert_eq!(matcher.resolve("platypus"), "platypus");
        assert_eq!(
            matcher.resolve_categories("platypus"),
            CategorySet::NotInNorms
        );
    }

    #[test]
    fn test_resolve_categories_through_fuzzy_match() {
        let matcher = NormMatcher::new(animal_norms());
        let chickens = matcher.resolve_categories("chickens");
        assert!(chickens.intersects(&matcher.resolve_categories("owl")));
        assert!(chickens.intersects(&matcher.resolve_categories("pig")));
    }

    #[test]
    fn test_stricter_cutoff_rejects_loose_match() {
        let matcher = NormMatcher::with_cutoff(animal_norms(), 0.95);
        assert_eq!(matcher.resolve("grapes"), "grapes");
    }

    #[test]
    fn test_resolve_all_keeps_order() {
        let matcher = NormMatcher::new(animal_norms());
        let items: Vec<String> = ["cow", "dragon", "owl"].iter().map(|s| s.to_string()).collect();
        let sets = matcher.resolve_all(&items);
        assert_eq!(sets.len(), 3);
        assert!(sets[0].is_known());
        assert!(!sets[1].is_known());
        assert!(sets[2].is_known());
    }
}
