//! Quote order lifecycle management.
//!
//! Owns at most one quote order per side and decides, for each new
//! target price, whether to cancel, place, or leave the side alone:
//! - Idle + nonzero target + position guard passes → insert
//! - Working at a different price (or target withdrawn) → cancel
//! - Working with a cancel in flight → wait for resolution
//!
//! A side only returns to Idle once its order has zero remaining volume,
//! either from fills adding up to the order size or from a status (or
//! error) report. Until then no replacement is placed, so a side never
//! has two live quote orders.
//!
//! Every order id the engine allocates, quote or hedge, is recorded with
//! its side and role so incoming events are classified in O(1).

use std::collections::HashMap;

use pairmm_core::{
    CancelOrder, InsertOrder, OrderId, OrderRequest, OrderRole, OrderSide, Position, Price,
    Volume,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::MakerConfig;
use crate::quote_engine::QuotePair;

/// A quote order currently outstanding on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkingQuote {
    /// Client order id.
    pub order_id: OrderId,
    /// Limit price the order was placed at.
    pub price: Price,
    /// Whether a cancel has been sent and not yet resolved.
    pub cancel_sent: bool,
}

/// State of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SideSlot {
    /// No quote order outstanding.
    #[default]
    Idle,
    /// A quote order is outstanding (possibly pending cancel).
    Working(WorkingQuote),
}

impl SideSlot {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Outstanding order id, if any.
    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            Self::Idle => None,
            Self::Working(q) => Some(q.order_id),
        }
    }

    /// True if a cancel is in flight for this side's order.
    pub fn is_pending_cancel(&self) -> bool {
        matches!(self, Self::Working(q) if q.cancel_sent)
    }
}

/// What the engine knows about an order it issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackedOrder {
    pub side: OrderSide,
    pub role: OrderRole,
    pub price: Price,
    /// Size the order was placed with.
    pub volume: Volume,
    /// Volume not yet reported filled.
    pub remaining: Volume,
}

/// Outcome of an order reaching zero remaining volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub order_id: OrderId,
    pub order: TrackedOrder,
    /// True if this freed a side slot back to Idle.
    pub freed_slot: bool,
}

/// A fill applied to a tracked order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedFill {
    pub order_id: OrderId,
    /// Order state after the fill.
    pub order: TrackedOrder,
    /// Filled volume, capped at what was still open.
    pub volume: Volume,
    /// Set when the fill completed the order.
    pub resolution: Option<Resolution>,
}

/// Per-side quote state machine plus order-id registry.
#[derive(Debug)]
pub struct OrderLifecycleManager {
    config: MakerConfig,
    bid: SideSlot,
    ask: SideSlot,
    /// Every unresolved order this engine issued.
    orders: HashMap<OrderId, TrackedOrder>,
    /// Next client order id. Strictly increasing.
    next_order_id: OrderId,
}

impl OrderLifecycleManager {
    /// Create a manager with both sides Idle.
    pub fn new(config: MakerConfig) -> Self {
        let next_order_id = config.first_order_id;
        Self {
            config,
            bid: SideSlot::Idle,
            ask: SideSlot::Idle,
            orders: HashMap::new(),
            next_order_id,
        }
    }

    /// Apply new target prices to both sides.
    ///
    /// Sides are evaluated independently; a cancel on one never blocks
    /// placement on the other.
    pub fn on_quotes(&mut self, quotes: QuotePair, position: Position) -> Vec<OrderRequest> {
        OrderSide::BOTH
            .iter()
            .filter_map(|&side| self.on_target(side, quotes.price(side), position))
            .collect()
    }

    /// Apply a new target price to one side.
    ///
    /// Returns the request to send, if any.
    pub fn on_target(
        &mut self,
        side: OrderSide,
        target: Price,
        position: Position,
    ) -> Option<OrderRequest> {
        match *self.slot(side) {
            SideSlot::Working(quote) => {
                if quote.cancel_sent || quote.price == target {
                    return None;
                }
                if let SideSlot::Working(q) = self.slot_mut(side) {
                    q.cancel_sent = true;
                }
                info!(
                    side = side.quote_label(),
                    order_id = quote.order_id,
                    old_price = quote.price,
                    target,
                    "Cancelling quote"
                );
                Some(CancelOrder::new(quote.order_id).into())
            }
            SideSlot::Idle => {
                if target == 0 {
                    return None;
                }
                if !self.position_allows(side, position) {
                    debug!(
                        side = side.quote_label(),
                        position,
                        limit = self.config.position_limit,
                        "Position guard blocked quote"
                    );
                    return None;
                }

                let order_id = self.allocate_id();
                let order = InsertOrder::quote(
                    order_id,
                    side,
                    target,
                    self.config.lot_size,
                    self.config.quote_lifespan,
                );
                self.track(&order);
                *self.slot_mut(side) = SideSlot::Working(WorkingQuote {
                    order_id,
                    price: target,
                    cancel_sent: false,
                });
                info!(
                    side = side.quote_label(),
                    order_id,
                    price = target,
                    volume = order.volume,
                    "Placing quote"
                );
                Some(order.into())
            }
        }
    }

    /// Allocate and register a hedge order. Hedges never occupy a slot.
    pub fn new_hedge(&mut self, side: OrderSide, price: Price, volume: Volume) -> InsertOrder {
        let order_id = self.allocate_id();
        let order = InsertOrder::hedge(order_id, side, price, volume, self.config.hedge_lifespan);
        self.track(&order);
        order
    }

    /// Apply a fill to a tracked order.
    ///
    /// The fill is capped at the order's open volume. A fill that leaves
    /// nothing open resolves the order exactly like a zero-remaining
    /// status. Unknown ids yield `None`.
    pub fn on_fill(&mut self, order_id: OrderId, volume: Volume) -> Option<AppliedFill> {
        let Some(order) = self.orders.get_mut(&order_id) else {
            debug!(order_id, volume, "Fill for untracked order ignored");
            return None;
        };

        let applied = volume.min(order.remaining);
        order.remaining -= applied;
        let order = *order;
        if applied < volume {
            warn!(
                order_id,
                reported = volume,
                applied,
                "Fill exceeds open volume, capped"
            );
        }

        let resolution = if order.remaining == 0 {
            self.resolve(order_id)
        } else {
            None
        };

        Some(AppliedFill {
            order_id,
            order,
            volume: applied,
            resolution,
        })
    }

    /// Handle an order status report.
    ///
    /// Orders with remaining volume stay tracked. Zero remaining resolves
    /// the order and, for a quote, returns its side to Idle. Unknown ids
    /// are ignored.
    pub fn on_order_status(&mut self, order_id: OrderId, remaining: Volume) -> Option<Resolution> {
        if remaining > 0 {
            if self.orders.contains_key(&order_id) {
                debug!(order_id, remaining, "Order partially filled, still working");
            }
            return None;
        }

        let resolution = self.resolve(order_id);
        if resolution.is_none() {
            debug!(order_id, "Status for untracked order ignored");
        }
        resolution
    }

    /// Whether `order_id` was allocated by this manager, resolved or not.
    pub fn issued(&self, order_id: OrderId) -> bool {
        (self.config.first_order_id..self.next_order_id).contains(&order_id)
    }

    /// Look up an unresolved order.
    pub fn lookup(&self, order_id: OrderId) -> Option<&TrackedOrder> {
        self.orders.get(&order_id)
    }

    /// Current state of one side.
    pub fn slot(&self, side: OrderSide) -> &SideSlot {
        match side {
            OrderSide::Buy => &self.bid,
            OrderSide::Sell => &self.ask,
        }
    }

    /// Whether placing one more lot on `side` keeps |position| within the limit.
    pub fn position_allows(&self, side: OrderSide, position: Position) -> bool {
        let lot = Position::try_from(self.config.lot_size).unwrap_or(Position::MAX);
        let limit = self.config.position_limit;
        match side {
            OrderSide::Buy => position < limit && position.saturating_add(lot) <= limit,
            OrderSide::Sell => position > -limit && position.saturating_sub(lot) >= -limit,
        }
    }

    /// Number of unresolved orders (quotes and hedges).
    pub fn tracked_count(&self) -> usize {
        self.orders.len()
    }

    /// Id the next order will receive.
    pub fn next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    // === Private helpers ===

    fn slot_mut(&mut self, side: OrderSide) -> &mut SideSlot {
        match side {
            OrderSide::Buy => &mut self.bid,
            OrderSide::Sell => &mut self.ask,
        }
    }

    fn resolve(&mut self, order_id: OrderId) -> Option<Resolution> {
        let order = self.orders.remove(&order_id)?;

        let freed_slot = order.role == OrderRole::Quote && {
            let slot = self.slot_mut(order.side);
            if slot.order_id() == Some(order_id) {
                *slot = SideSlot::Idle;
                true
            } else {
                false
            }
        };

        debug!(
            order_id,
            role = %order.role,
            side = %order.side,
            freed_slot,
            "Order resolved"
        );

        Some(Resolution {
            order_id,
            order,
            freed_slot,
        })
    }

    fn allocate_id(&mut self) -> OrderId {
        let id = self.next_order_id;
        self.next_order_id += 1;
        id
    }

    fn track(&mut self, order: &InsertOrder) {
        self.orders.insert(
            order.order_id,
            TrackedOrder {
                side: order.side,
                role: order.role,
                price: order.price,
                volume: order.volume,
                remaining: order.volume,
            },
        );
    }
}
