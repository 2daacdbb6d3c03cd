//! Prometheus metrics and structured logging for the pair market maker.
//!
//! - Prometheus counters for quotes, cancels and hedges
//! - Net position gauge
//! - Structured logging with tracing (pretty or JSON)

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
