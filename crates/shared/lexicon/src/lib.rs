//! Forage Lexicon
//!
//! In-memory adapters for the lexical resources switch detection consumes.
//! Building the resources (embeddings, similarity matrices, frequency counts,
//! SVD clustering) happens upstream; this crate only holds the finished tables
//! and derives per-list series from them.
//!
//! ```text
//! LexicalTables ──► HistorySeries::build(items) ──► semantic[k] = S(item k, item k-1)
//!                                                   phonological[k]
//!                                                   frequency[k]
//! SvdClusters   ──► ClusterMembership::gtom_clustered(pair, threshold)
//! ```

mod clusters;
mod history;
mod tables;

pub use clusters::SvdClusters;
pub use history::{HistorySeries, PLACEHOLDER_SIMILARITY};
pub use tables::LexicalTables;

// Re-export the ports for convenience
pub use forage_ports::{ClusterMembership, LexicalResource, SimilarityKind};
