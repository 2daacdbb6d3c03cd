//! Market making configuration.
//!
//! Every field defaults to the venue's fixed trading constants. The
//! config is read once at startup and never changes while running.

use pairmm_core::{
    CoreError, Lifespan, OrderId, Position, Price, Volume, LOT_SIZE, POSITION_LIMIT,
    SPREAD_THRESHOLD_TICKS, TICK_SIZE,
};
use serde::{Deserialize, Serialize};

/// Market making configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakerConfig {
    /// Quote size in lots.
    #[serde(default = "default_lot_size")]
    pub lot_size: Volume,

    /// Quotes are only placed while |position| stays within this bound.
    #[serde(default = "default_position_limit")]
    pub position_limit: Position,

    /// Minimum price increment.
    #[serde(default = "default_tick_size")]
    pub tick_size: Price,

    /// Hedge spread must exceed this many ticks to quote.
    #[serde(default = "default_spread_threshold_ticks")]
    pub spread_threshold_ticks: Price,

    /// Lifespan of resting quote orders.
    #[serde(default)]
    pub quote_lifespan: Lifespan,

    /// Lifespan of hedge orders.
    #[serde(default = "default_hedge_lifespan")]
    pub hedge_lifespan: Lifespan,

    /// First client order id handed out.
    #[serde(default = "default_first_order_id")]
    pub first_order_id: OrderId,
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            lot_size: default_lot_size(),
            position_limit: default_position_limit(),
            tick_size: default_tick_size(),
            spread_threshold_ticks: default_spread_threshold_ticks(),
            quote_lifespan: Lifespan::default(),
            hedge_lifespan: default_hedge_lifespan(),
            first_order_id: default_first_order_id(),
        }
    }
}

impl MakerConfig {
    /// Minimum spread (exclusive) at which we quote.
    pub fn spread_threshold(&self) -> Price {
        self.spread_threshold_ticks * self.tick_size
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.lot_size == 0 {
            return Err(CoreError::InvalidConfig("lot_size must be > 0".into()));
        }
        if self.tick_size <= 0 {
            return Err(CoreError::InvalidConfig("tick_size must be > 0".into()));
        }
        if self.spread_threshold_ticks <= 0 {
            return Err(CoreError::InvalidConfig(
                "spread_threshold_ticks must be > 0".into(),
            ));
        }
        if self.position_limit < 0 {
            return Err(CoreError::InvalidConfig(
                "position_limit must be >= 0".into(),
            ));
        }
        if (self.position_limit as u64) < self.lot_size {
            return Err(CoreError::InvalidConfig(format!(
                "position_limit {} is smaller than one lot ({})",
                self.position_limit, self.lot_size
            )));
        }
        if self.first_order_id == 0 {
            // 0 is reserved for errors not tied to an order
            return Err(CoreError::InvalidConfig(
                "first_order_id must be > 0".into(),
            ));
        }
        Ok(())
    }
}

fn default_lot_size() -> Volume {
    LOT_SIZE
}
fn default_position_limit() -> Position {
    POSITION_LIMIT
}
fn default_tick_size() -> Price {
    TICK_SIZE
}
fn default_spread_threshold_ticks() -> Price {
    SPREAD_THRESHOLD_TICKS
}
fn default_hedge_lifespan() -> Lifespan {
    Lifespan::FillAndKill
}
fn default_first_order_id() -> OrderId {
    1
}
