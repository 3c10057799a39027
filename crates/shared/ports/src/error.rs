use thiserror::Error;

/// Errors raised by switch detectors, always before any scan starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SwitchError {
    #[error("Parameter {name} must be within [0, 1], got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("{series} has {actual} entries but the fluency list has {expected}")]
    DimensionMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Detector {detector} requires {input}")]
    MissingInput {
        detector: &'static str,
        input: &'static str,
    },

    #[error("Fluency list is empty")]
    EmptySequence,
}

pub type SwitchResult<T> = std::result::Result<T, SwitchError>;

/// Errors raised by the response-time curve fit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("Curve fit did not converge within {evaluations} evaluations")]
    NonConvergence { evaluations: usize },

    #[error("Reaction time series is empty")]
    EmptySeries,

    #[error("Invalid reaction times: {0}")]
    InvalidReactionTimes(String),

    #[error("Degenerate parameter bounds: upper bound for c is {upper}")]
    DegenerateBounds { upper: f64 },
}

pub type FitResult<T> = std::result::Result<T, FitError>;

/// Errors raised while reading lexical resources
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexiconError {
    #[error("Item not in lexical vocabulary: {0}")]
    UnknownItem(String),

    #[error("{table} has {actual} entries, expected {expected}")]
    DimensionMismatch {
        table: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{0} is not loaded")]
    MissingTable(&'static str),

    #[error("{table} is not symmetric at ({row}, {col})")]
    AsymmetricMatrix {
        table: &'static str,
        row: usize,
        col: usize,
    },
}

pub type LexiconResult<T> = std::result::Result<T, LexiconError>;
