//! Error types for pairmm-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
