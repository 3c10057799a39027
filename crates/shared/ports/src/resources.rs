use forage_core::{CategorySet, Item, Similarity};

use crate::error::LexiconResult;

/// Port for resolving free-text items against a category norms table
pub trait CategoryResolver: Send + Sync {
    /// Resolve `label` to its closest canonical entry and return its categories
    fn resolve_categories(&self, label: &str) -> CategorySet;

    /// Resolve every item of a fluency list, in order
    fn resolve_all(&self, items: &[Item]) -> Vec<CategorySet> {
        items
            .iter()
            .map(|item| self.resolve_categories(item))
            .collect()
    }
}

/// Port for the precomputed SVD cluster assignment
///
/// Answers whether two items are jointly clustered under a GTOM threshold.
pub trait ClusterMembership: Send + Sync {
    fn gtom_clustered(&self, pair: (&str, &str), threshold: f64) -> bool;
}

/// Which similarity table to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimilarityKind {
    Semantic,
    Phonological,
}

/// Port for precomputed lexical resources
///
/// Implementations hold symmetric similarity matrices and per-item frequencies,
/// all indexed by item label.
pub trait LexicalResource: Send + Sync {
    /// Similarity between two items in the given table
    fn similarity(&self, kind: SimilarityKind, a: &str, b: &str) -> LexiconResult<Similarity>;

    /// Frequency value of one item
    fn frequency(&self, item: &str) -> LexiconResult<f64>;

    /// Returns true if phonological similarities are available
    fn has_phonology(&self) -> bool;
}
