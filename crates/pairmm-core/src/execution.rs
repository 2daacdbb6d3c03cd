//! Outbound venue requests.
//!
//! The engine never talks to the venue directly; it produces these
//! requests and hands them to a gateway. Both are fire-and-forget: their
//! effect is only observed through later fill/status/error events.

use serde::{Deserialize, Serialize};

use crate::order::{Lifespan, OrderRole, OrderSide};
use crate::{OrderId, Price, Volume};

/// Request to insert a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertOrder {
    /// Freshly allocated client order id.
    pub order_id: OrderId,
    /// Order side (buy/sell).
    pub side: OrderSide,
    /// Limit price.
    pub price: Price,
    /// Order volume in lots.
    pub volume: Volume,
    /// Lifespan on the venue.
    pub lifespan: Lifespan,
    /// Quote or hedge.
    pub role: OrderRole,
}

impl InsertOrder {
    /// Create a resting quote order.
    #[must_use]
    pub fn quote(
        order_id: OrderId,
        side: OrderSide,
        price: Price,
        volume: Volume,
        lifespan: Lifespan,
    ) -> Self {
        Self {
            order_id,
            side,
            price,
            volume,
            lifespan,
            role: OrderRole::Quote,
        }
    }

    /// Create an immediate hedge order.
    #[must_use]
    pub fn hedge(
        order_id: OrderId,
        side: OrderSide,
        price: Price,
        volume: Volume,
        lifespan: Lifespan,
    ) -> Self {
        Self {
            order_id,
            side,
            price,
            volume,
            lifespan,
            role: OrderRole::Hedge,
        }
    }
}

/// Request to cancel a working order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    /// Client order id to cancel.
    pub order_id: OrderId,
}

impl CancelOrder {
    #[must_use]
    pub fn new(order_id: OrderId) -> Self {
        Self { order_id }
    }
}

/// Any request the engine may issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderRequest {
    Insert(InsertOrder),
    Cancel(CancelOrder),
}

impl OrderRequest {
    /// Order id the request refers to.
    pub fn order_id(&self) -> OrderId {
        match self {
            Self::Insert(o) => o.order_id,
            Self::Cancel(c) => c.order_id,
        }
    }

    /// Returns the insert payload, if this is an insert.
    pub fn as_insert(&self) -> Option<&InsertOrder> {
        match self {
            Self::Insert(o) => Some(o),
            Self::Cancel(_) => None,
        }
    }

    /// True if this cancels an order.
    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel(_))
    }
}

impl From<InsertOrder> for OrderRequest {
    fn from(order: InsertOrder) -> Self {
        Self::Insert(order)
    }
}

impl From<CancelOrder> for OrderRequest {
    fn from(cancel: CancelOrder) -> Self {
        Self::Cancel(cancel)
    }
}
