//! Prometheus metrics for the pair market maker.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A failure means duplicate metric
//! names, a startup bug, and only happens on first access.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_int_counter, register_int_gauge, CounterVec, Encoder,
    IntCounter, IntGauge, TextEncoder,
};

use crate::error::TelemetryResult;

/// Inbound events processed by kind (book/fill/status/error).
pub static EVENTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pairmm_events_total",
        "Inbound venue events processed",
        &["kind"]
    )
    .unwrap()
});

/// Quote orders inserted, by side (bid/ask).
pub static QUOTES_INSERTED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pairmm_quotes_inserted_total",
        "Quote orders inserted",
        &["side"]
    )
    .unwrap()
});

/// Cancels sent, by side.
pub static CANCELS_SENT_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pairmm_cancels_sent_total",
        "Quote cancel requests sent",
        &["side"]
    )
    .unwrap()
});

/// Side slots returned to idle, by side.
pub static SLOTS_RESOLVED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pairmm_slots_resolved_total",
        "Quote orders fully resolved",
        &["side"]
    )
    .unwrap()
});

/// Hedge orders sent, by hedge side (buy/sell).
pub static HEDGES_SENT_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pairmm_hedges_sent_total",
        "Hedge orders sent",
        &["side"]
    )
    .unwrap()
});

/// Hedge attempts abandoned.
pub static HEDGES_ABORTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pairmm_hedges_aborted_total",
        "Hedge attempts abandoned before sending"
    )
    .unwrap()
});

/// Venue error events received.
pub static VENUE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "pairmm_venue_errors_total",
        "Venue error events received"
    )
    .unwrap()
});

/// Net position in lots.
pub static POSITION: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "pairmm_position",
        "Net position in the traded instrument"
    )
    .unwrap()
});

/// Metrics recording facade.
pub struct Metrics;

impl Metrics {
    /// Record an inbound event.
    pub fn event(kind: &str) {
        EVENTS_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record a quote insert.
    pub fn quote_inserted(side: &str) {
        QUOTES_INSERTED_TOTAL.with_label_values(&[side]).inc();
    }

    /// Record a cancel request.
    pub fn cancel_sent(side: &str) {
        CANCELS_SENT_TOTAL.with_label_values(&[side]).inc();
    }

    /// Record a side slot returning to idle.
    pub fn slot_resolved(side: &str) {
        SLOTS_RESOLVED_TOTAL.with_label_values(&[side]).inc();
    }

    /// Record a hedge order.
    pub fn hedge_sent(side: &str) {
        HEDGES_SENT_TOTAL.with_label_values(&[side]).inc();
    }

    /// Record an abandoned hedge.
    pub fn hedge_aborted() {
        HEDGES_ABORTED_TOTAL.inc();
    }

    /// Record a venue error.
    pub fn venue_error() {
        VENUE_ERRORS_TOTAL.inc();
    }

    /// Set the net position gauge.
    pub fn position(position: i64) {
        POSITION.set(position);
    }

    /// Render all registered metrics in Prometheus text format.
    pub fn gather() -> TelemetryResult<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
