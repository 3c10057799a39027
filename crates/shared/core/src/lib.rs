//! Forage Core Domain
//!
//! Pure domain types for verbal fluency switch detection.
//! This crate contains no I/O and no logging, and is 100% unit testable.
//!
//! A fluency list is the ordered sequence of items one subject produced under a
//! category prompt. Every classifier in the workspace maps such a list to a
//! sequence of the same length:
//!
//! ```text
//! items:           snake  lion   ox     monkey  fish
//! classification:  2      0      0      1       1
//!                  │      │             │
//!                  │      │             └── Switch: a new cluster starts here
//!                  │      └── NoSwitch: continues the current cluster
//!                  └── Boundary: no preceding context
//! ```

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    CategoryNorms, CategorySet, Classification, NormRow, SwitchCode, TimingClassification,
    TimingCode,
};
pub use values::{Category, Item, ReactionTime, Similarity};
