use forage_ports::{LexiconError, SwitchError};
use thiserror::Error;

/// Errors that stop one subject's run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunnerError {
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("Switch detection error: {0}")]
    Switch(#[from] SwitchError),

    #[error("Subject {subject} has {actual} reaction times for {expected} items")]
    ReactionTimeMismatch {
        subject: String,
        expected: usize,
        actual: usize,
    },
}

pub type RunnerResult<T> = Result<T, RunnerError>;
