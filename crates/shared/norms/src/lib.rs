//! Forage Category Norms
//!
//! Reconciles free-text fluency items with a controlled norms vocabulary.
//! Free-text responses rarely match the canonical labels exactly ("grapes"
//! vs "grape"), so lookups go through a sequence-ratio fuzzy match first.

mod matcher;
mod ratio;

pub use matcher::{DEFAULT_CUTOFF, NormMatcher};
pub use ratio::{close_match, quick_ratio, real_quick_ratio, sequence_ratio};

// Re-export the port for convenience
pub use forage_ports::CategoryResolver;
