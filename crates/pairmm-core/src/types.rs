//! Order book ladder.
//!
//! A `Ladder` is the five best price levels on each side of an
//! instrument's book, as delivered by the venue. Prices are ordered
//! best-first; a zero price at index 0 means the side is empty.

use serde::{Deserialize, Serialize};

use crate::order::OrderSide;
use crate::{Price, Volume};

/// Number of price levels reported per side.
pub const LADDER_DEPTH: usize = 5;

/// Five-level bid/ask view of one instrument's book.
///
/// Replaced wholesale on each book update, never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ladder {
    /// Ask prices, lowest first.
    pub ask_prices: [Price; LADDER_DEPTH],
    /// Volume resting at each ask price.
    pub ask_volumes: [Volume; LADDER_DEPTH],
    /// Bid prices, highest first.
    pub bid_prices: [Price; LADDER_DEPTH],
    /// Volume resting at each bid price.
    pub bid_volumes: [Volume; LADDER_DEPTH],
}

impl Ladder {
    pub fn new(
        ask_prices: [Price; LADDER_DEPTH],
        ask_volumes: [Volume; LADDER_DEPTH],
        bid_prices: [Price; LADDER_DEPTH],
        bid_volumes: [Volume; LADDER_DEPTH],
    ) -> Self {
        Self {
            ask_prices,
            ask_volumes,
            bid_prices,
            bid_volumes,
        }
    }

    /// Best bid price (0 when no bids).
    pub fn best_bid(&self) -> Price {
        self.bid_prices[0]
    }

    /// Best ask price (0 when no asks).
    pub fn best_ask(&self) -> Price {
        self.ask_prices[0]
    }

    /// True if at least one side has resting interest.
    pub fn has_top(&self) -> bool {
        self.best_bid() != 0 || self.best_ask() != 0
    }

    /// Top-of-book spread: ask - bid.
    pub fn spread(&self) -> Price {
        self.best_ask() - self.best_bid()
    }

    /// Prices and volumes resting on one side of the book.
    ///
    /// `Buy` selects the bid side, `Sell` the ask side.
    pub fn levels(&self, side: OrderSide) -> (&[Price], &[Volume]) {
        match side {
            OrderSide::Buy => (&self.bid_prices, &self.bid_volumes),
            OrderSide::Sell => (&self.ask_prices, &self.ask_volumes),
        }
    }
}
