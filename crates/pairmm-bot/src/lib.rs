//! Pair market maker application.
//!
//! Wires the engine to an event source:
//! - Loads configuration
//! - Decodes venue events into a bounded channel
//! - Drives a single engine task, one event at a time

pub mod app;
pub mod config;
pub mod error;

pub use app::{Application, ReaderStats, RunSummary};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
