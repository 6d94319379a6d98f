//! Error types for famboard.

use thiserror::Error;

/// Errors that can occur in famboard operations.
#[derive(Error, Debug)]
pub enum FamBoardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for famboard operations.
pub type FamBoardResult<T> = Result<T, FamBoardError>;
