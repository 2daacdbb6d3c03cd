//! Instrument identification.
//!
//! The engine works on exactly one pair: a traded instrument it quotes,
//! and a correlated hedge instrument whose book drives the quotes and
//! which absorbs every fill.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two instruments in the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    /// Instrument we quote and whose fills move position.
    Traded,
    /// Correlated instrument used as price reference and hedge venue.
    Hedge,
}

impl Instrument {
    /// All instruments, in index order.
    pub const ALL: [Instrument; 2] = [Instrument::Traded, Instrument::Hedge];

    /// Stable index for array-backed storage.
    pub fn index(&self) -> usize {
        match self {
            Self::Traded => 0,
            Self::Hedge => 1,
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Traded => write!(f, "traded"),
            Self::Hedge => write!(f, "hedge"),
        }
    }
}
