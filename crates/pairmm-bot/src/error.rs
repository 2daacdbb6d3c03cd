//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] pairmm_core::CoreError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] pairmm_telemetry::TelemetryError),

    #[error("Event reader failed: {0}")]
    Reader(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
