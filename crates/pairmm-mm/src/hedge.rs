//! Hedge execution after quote fills.
//!
//! When a quote trades, the same volume is immediately offset on the
//! hedge instrument. Selling the hedge references its ask side, buying
//! references its bid side. The price is the volume-weighted reference
//! price when that beats the fill price, otherwise the reference top of
//! book.

use pairmm_core::{CoreError, InsertOrder, Ladder, OrderSide, Price, Volume};
use thiserror::Error;
use tracing::info;

use crate::lifecycle::OrderLifecycleManager;
use crate::quote_engine::weighted_average_price;

/// Why a hedge attempt was abandoned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HedgeError {
    #[error("No resting interest on hedge {side} side")]
    EmptyReferenceLadder { side: &'static str },

    #[error("Hedge pricing failed: {0}")]
    Pricing(#[from] CoreError),
}

/// Computes and allocates offsetting orders on the hedge instrument.
#[derive(Debug, Default, Clone, Copy)]
pub struct HedgeExecutor;

impl HedgeExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Choose side and price for hedging a quote fill.
    ///
    /// On an exact tie between the weighted price and the fill price the
    /// weighted price is used.
    pub fn hedge_price(
        &self,
        filled_side: OrderSide,
        fill_price: Price,
        hedge: &Ladder,
    ) -> Result<(OrderSide, Price), HedgeError> {
        let hedge_side = filled_side.opposite();
        // Selling the hedge references its asks, buying its bids
        let (prices, volumes) = hedge.levels(hedge_side);

        let top = prices[0];
        if top == 0 {
            return Err(HedgeError::EmptyReferenceLadder {
                side: hedge_side.quote_label(),
            });
        }

        let weighted = weighted_average_price(prices, volumes)?;
        let price = match hedge_side {
            OrderSide::Sell if weighted >= fill_price => weighted,
            OrderSide::Buy if weighted <= fill_price => weighted,
            _ => top,
        };

        Ok((hedge_side, price))
    }

    /// Build the hedge order for a quote fill, allocating its id.
    ///
    /// No order id is consumed when pricing fails.
    pub fn on_fill(
        &self,
        filled_side: OrderSide,
        fill_price: Price,
        volume: Volume,
        hedge: &Ladder,
        lifecycle: &mut OrderLifecycleManager,
    ) -> Result<InsertOrder, HedgeError> {
        let (side, price) = self.hedge_price(filled_side, fill_price, hedge)?;
        let order = lifecycle.new_hedge(side, price, volume);
        info!(
            order_id = order.order_id,
            side = %side,
            price,
            volume,
            fill_price,
            "Hedging quote fill"
        );
        Ok(order)
    }
}
