//! Error types for the availability engine.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur in availability and coverage operations.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Event fetch error: {0}")]
    Fetch(String),

    #[error("Event fetch timed out after {0}s")]
    FetchTimeout(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
