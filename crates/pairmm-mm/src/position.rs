//! Net position tracking.
//!
//! Tracks the signed position in the traded instrument from quote fills,
//! plus bookkeeping counters that never feed back into decisions.

use pairmm_core::{OrderSide, Position, Volume};
use serde::Serialize;

/// Net position and fill accounting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PositionTracker {
    /// Net position (positive = long).
    position: Position,
    /// Number of quote fills processed.
    fill_count: u64,
    /// Total volume bought through quote fills.
    bought_volume: Volume,
    /// Total volume sold through quote fills.
    sold_volume: Volume,
    /// Accumulated fees from order status reports (negative = rebate).
    fees: i64,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a quote fill. Bid fills add, ask fills subtract.
    ///
    /// Never rejects: fills can take position past the placement limit.
    pub fn on_fill(&mut self, side: OrderSide, volume: Volume) {
        let signed = Position::try_from(volume).unwrap_or(Position::MAX) * side.sign();
        self.position = self.position.saturating_add(signed);
        self.fill_count += 1;
        match side {
            OrderSide::Buy => self.bought_volume += volume,
            OrderSide::Sell => self.sold_volume += volume,
        }
    }

    /// Accumulate fees reported by an order status event.
    pub fn record_fees(&mut self, fees: i64) {
        self.fees = self.fees.saturating_add(fees);
    }

    /// Current net position.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn fill_count(&self) -> u64 {
        self.fill_count
    }

    pub fn bought_volume(&self) -> Volume {
        self.bought_volume
    }

    pub fn sold_volume(&self) -> Volume {
        self.sold_volume
    }

    pub fn fees(&self) -> i64 {
        self.fees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_fill_increases_position() {
        let mut tracker = PositionTracker::new();
        tracker.on_fill(OrderSide::Buy, 100);
        assert_eq!(tracker.position(), 100);
        assert_eq!(tracker.bought_volume(), 100);
    }

    #[test]
    fn test_ask_fill_decreases_position() {
        let mut tracker = PositionTracker::new();
        tracker.on_fill(OrderSide::Sell, 40);
        assert_eq!(tracker.position(), -40);
        assert_eq!(tracker.sold_volume(), 40);
    }

    #[test]
    fn test_fills_are_never_capped() {
        let mut tracker = PositionTracker::new();
        for _ in 0..12 {
            tracker.on_fill(OrderSide::Buy, 100);
        }
        assert_eq!(tracker.position(), 1200);
        assert_eq!(tracker.fill_count(), 12);
    }

    #[test]
    fn test_round_trip_flat() {
        let mut tracker = PositionTracker::new();
        tracker.on_fill(OrderSide::Buy, 100);
        tracker.on_fill(OrderSide::Sell, 100);
        assert_eq!(tracker.position(), 0);
        assert_eq!(tracker.fill_count(), 2);
    }

    #[test]
    fn test_fees_accumulate() {
        let mut tracker = PositionTracker::new();
        tracker.record_fees(5);
        tracker.record_fees(-2);
        assert_eq!(tracker.fees(), 3);
    }
}
