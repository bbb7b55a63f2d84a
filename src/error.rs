//! Error types.
//!
//! The engine's game commands never fail. Errors only come from building a
//! configuration, from the score store collaborator, and from talking to a
//! driver task that has shut down.

use thiserror::Error;

/// Invalid engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,
    #[error("alphabet has {0} symbols, at most 256 are supported")]
    AlphabetTooLarge(usize),
    #[error("duplicate alphabet label: {0}")]
    DuplicateLabel(String),
    #[error("step interval must be greater than zero")]
    ZeroStepInterval,
    #[error("show duration {show_ms}ms must be shorter than step interval {step_ms}ms")]
    OverlappingReveal { show_ms: u64, step_ms: u64 },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure reported by a score store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed score record on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode score record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The driver task is no longer running.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("engine task has stopped")]
    Closed,
}
