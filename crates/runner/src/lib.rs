//! Forage Runner - Batch Classification
//!
//! Runs a configured set of switch methods and the response-time classifier
//! over many subjects against shared lexical resources.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//!   │ LexicalTables│  │ NormMatcher  │  │ SvdClusters  │
//!   └──────┬───────┘  └──────┬───────┘  └──────┬───────┘
//!          └─────────────────┼─────────────────┘
//!                            ▼ BatchResources (shared, read-only)
//!              ┌───────────────────────────┐
//!              │        BatchRunner        │
//!              │  detectors + CurveFitter  │
//!              └─────────────┬─────────────┘
//!                            │ par_iter over subjects
//!          ┌─────────────────┼─────────────────┐
//!          ▼                 ▼                 ▼
//!    SubjectOutcome    SubjectOutcome    SubjectOutcome
//! ```
//!
//! The norm matcher's fuzzy-match cache is concurrent, so subjects running on
//! different threads share resolved labels.

pub mod batch;
pub mod config;
pub mod error;

pub use batch::{BatchReport, BatchResources, BatchRunner, SubjectOutcome, SubjectReport};
pub use config::{RunnerConfig, Subject};
pub use error::{RunnerError, RunnerResult};
