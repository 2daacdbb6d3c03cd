//! Inbound venue events.
//!
//! The venue layer decodes its own wire messages; by the time an event
//! reaches the engine it is one of the four variants below. A JSON-lines
//! form is provided so recorded sessions can be replayed.

use pairmm_core::{Instrument, Ladder, OrderId, Price, Volume, LADDER_DEPTH};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FeedError, FeedResult};

/// An already-decoded event from the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Fresh 5-level ladder for one instrument.
    OrderBookUpdate {
        instrument: Instrument,
        sequence: u64,
        ask_prices: [Price; LADDER_DEPTH],
        ask_volumes: [Volume; LADDER_DEPTH],
        bid_prices: [Price; LADDER_DEPTH],
        bid_volumes: [Volume; LADDER_DEPTH],
    },
    /// One of our orders traded (partially or fully).
    OrderFilled {
        order_id: OrderId,
        price: Price,
        volume: Volume,
    },
    /// Status change for one of our orders. Cancelled orders report zero remaining.
    OrderStatus {
        order_id: OrderId,
        fill_volume: Volume,
        remaining_volume: Volume,
        fees: i64,
    },
    /// Venue-side error. `order_id` is 0 when not tied to an order.
    Error { order_id: OrderId, message: String },
}

impl EngineEvent {
    /// Build a book update from a ladder.
    pub fn book(instrument: Instrument, sequence: u64, ladder: Ladder) -> Self {
        Self::OrderBookUpdate {
            instrument,
            sequence,
            ask_prices: ladder.ask_prices,
            ask_volumes: ladder.ask_volumes,
            bid_prices: ladder.bid_prices,
            bid_volumes: ladder.bid_volumes,
        }
    }

    /// Short event kind for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderBookUpdate { .. } => "book",
            Self::OrderFilled { .. } => "fill",
            Self::OrderStatus { .. } => "status",
            Self::Error { .. } => "error",
        }
    }
}

/// Decodes JSON-lines event streams.
#[derive(Debug, Default)]
pub struct EventParser {
    line_no: u64,
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse_line(&mut self, line: &str) -> FeedResult<Option<EngineEvent>> {
        self.line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let line = self.line_no;
        let event: EngineEvent = serde_json::from_str(trimmed)
            .map_err(|source| FeedError::Parse { line, source })?;
        debug!(line = self.line_no, kind = event.kind(), "Parsed event");
        Ok(Some(event))
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.line_no
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_update() {
        let mut parser = EventParser::new();
        let line = r#"{"type":"order_book_update","instrument":"hedge","sequence":3,
            "ask_prices":[10300,10400,0,0,0],"ask_volumes":[5,5,0,0,0],
            "bid_prices":[10000,9900,0,0,0],"bid_volumes":[5,5,0,0,0]}"#
            .replace('\n', "");
        let event = parser.parse_line(&line).unwrap().unwrap();
        match event {
            EngineEvent::OrderBookUpdate {
                instrument,
                sequence,
                ask_prices,
                ..
            } => {
                assert_eq!(instrument, Instrument::Hedge);
                assert_eq!(sequence, 3);
                assert_eq!(ask_prices[0], 10300);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_parse_status_and_error() {
        let mut parser = EventParser::new();
        let line = r#"{"type":"order_status","order_id":4,"fill_volume":100,
            "remaining_volume":0,"fees":-2}"#
            .replace('\n', "");
        let status = parser.parse_line(&line).unwrap().unwrap();
        assert_eq!(
            status,
            EngineEvent::OrderStatus {
                order_id: 4,
                fill_volume: 100,
                remaining_volume: 0,
                fees: -2
            }
        );

        let err = parser
            .parse_line(r#"{"type":"error","order_id":0,"message":"rate limited"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(err.kind(), "error");
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let mut parser = EventParser::new();
        assert!(parser.parse_line("").unwrap().is_none());
        assert!(parser.parse_line("   # session start").unwrap().is_none());
        assert_eq!(parser.lines_read(), 2);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let mut parser = EventParser::new();
        parser.parse_line("").unwrap();
        let err = parser.parse_line("{not json").unwrap_err();
        match err {
            FeedError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_book_constructor_round_trips_ladder() {
        let ladder = Ladder::new(
            [2, 0, 0, 0, 0],
            [1, 0, 0, 0, 0],
            [1, 0, 0, 0, 0],
            [1, 0, 0, 0, 0],
        );
        match EngineEvent::book(Instrument::Traded, 1, ladder) {
            EngineEvent::OrderBookUpdate { bid_prices, .. } => assert_eq!(bid_prices[0], 1),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
