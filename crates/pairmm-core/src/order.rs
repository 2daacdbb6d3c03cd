//! Order-related enums.
//!
//! Provides order side, lifespan and role types for the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Both sides, bid first.
    pub const BOTH: [OrderSide; 2] = [OrderSide::Buy, OrderSide::Sell];

    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns 1 for buy, -1 for sell (for position calculations).
    pub fn sign(&self) -> i64 {
        match self {
            Self::Buy => 1,
            Self::Sell => -1,
        }
    }

    /// Quote-side label used in logs and metrics.
    pub fn quote_label(&self) -> &'static str {
        match self {
            Self::Buy => "bid",
            Self::Sell => "ask",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// How long an order may rest on the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifespan {
    /// Rests until filled or cancelled. Used for quotes.
    #[default]
    GoodForDay,
    /// Trades what it can immediately, remainder is cancelled. Used for hedges.
    FillAndKill,
}

impl fmt::Display for Lifespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodForDay => write!(f, "GFD"),
            Self::FillAndKill => write!(f, "FAK"),
        }
    }
}

/// Why an order was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderRole {
    /// Resting quote, owned by a side slot.
    Quote,
    /// Offsetting order sent after a quote fill. Never occupies a slot.
    Hedge,
}

impl fmt::Display for OrderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quote => write!(f, "quote"),
            Self::Hedge => write!(f, "hedge"),
        }
    }
}
