//! Event-driven engine driver.
//!
//! Owns every piece of strategy state and processes one venue event at a
//! time to completion. Callers must not interleave calls; the engine holds
//! no locks and relies on that dispatch discipline.

use pairmm_core::{
    Instrument, Ladder, OrderId, OrderRequest, OrderRole, OrderSide, Position, Price, Volume,
};
use pairmm_feed::{EngineEvent, OrderBookStore};
use pairmm_telemetry::Metrics;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::config::MakerConfig;
use crate::gateway::OrderGateway;
use crate::hedge::HedgeExecutor;
use crate::lifecycle::{OrderLifecycleManager, Resolution, SideSlot};
use crate::position::PositionTracker;
use crate::quote_engine::{compute_quotes, QuotePair};

/// Point-in-time view of engine state.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    pub position: Position,
    pub bid: SideSlot,
    pub ask: SideSlot,
    pub last_bid_target: Price,
    pub last_ask_target: Price,
    pub tracked_orders: usize,
    pub next_order_id: OrderId,
    pub fill_count: u64,
    pub bought_volume: Volume,
    pub sold_volume: Volume,
    pub fees: i64,
    pub hedges_sent: u64,
    pub hedges_aborted: u64,
}

/// Pair market making engine.
pub struct Engine<G: OrderGateway> {
    config: MakerConfig,
    books: OrderBookStore,
    lifecycle: OrderLifecycleManager,
    hedger: HedgeExecutor,
    position: PositionTracker,
    gateway: G,
    last_quotes: QuotePair,
    hedges_sent: u64,
    hedges_aborted: u64,
}

impl<G: OrderGateway> Engine<G> {
    /// Create an engine sending requests through `gateway`.
    pub fn new(config: MakerConfig, gateway: G) -> Self {
        Self {
            lifecycle: OrderLifecycleManager::new(config.clone()),
            config,
            books: OrderBookStore::new(),
            hedger: HedgeExecutor::new(),
            position: PositionTracker::new(),
            gateway,
            last_quotes: QuotePair::withdrawn(),
            hedges_sent: 0,
            hedges_aborted: 0,
        }
    }

    /// Dispatch one inbound event.
    pub fn handle(&mut self, event: EngineEvent) {
        Metrics::event(event.kind());
        match event {
            EngineEvent::OrderBookUpdate {
                instrument,
                sequence,
                ask_prices,
                ask_volumes,
                bid_prices,
                bid_volumes,
            } => self.on_order_book_update(
                instrument,
                sequence,
                Ladder::new(ask_prices, ask_volumes, bid_prices, bid_volumes),
            ),
            EngineEvent::OrderFilled {
                order_id,
                price,
                volume,
            } => self.on_order_filled(order_id, price, volume),
            EngineEvent::OrderStatus {
                order_id,
                fill_volume,
                remaining_volume,
                fees,
            } => self.on_order_status(order_id, fill_volume, remaining_volume, fees),
            EngineEvent::Error { order_id, message } => self.on_error(order_id, &message),
        }
    }

    /// Store a ladder and, on hedge updates, requote.
    ///
    /// Requoting needs both instruments to show resting interest.
    pub fn on_order_book_update(&mut self, instrument: Instrument, sequence: u64, ladder: Ladder) {
        self.books.update(instrument, sequence, ladder);

        if instrument != Instrument::Hedge {
            return;
        }
        if !self.books.all_quoted() {
            debug!(sequence, "Skipping requote: a book has no resting interest");
            return;
        }

        let quotes = compute_quotes(&ladder, &self.config);
        if quotes != self.last_quotes {
            debug!(bid = quotes.bid, ask = quotes.ask, "Target quotes changed");
        }
        self.last_quotes = quotes;

        let requests = self.lifecycle.on_quotes(quotes, self.position.position());
        for request in &requests {
            self.dispatch(request);
        }
    }

    /// Handle a fill on one of our orders.
    ///
    /// Quote fills move position and are hedged. Hedge fills and unknown
    /// ids are ignored. Fills are capped at the order's open volume, and a
    /// fill that completes an order resolves it.
    pub fn on_order_filled(&mut self, order_id: OrderId, price: Price, volume: Volume) {
        let Some(fill) = self.lifecycle.on_fill(order_id, volume) else {
            return;
        };
        if let Some(res) = fill.resolution {
            self.record_resolution(&res);
        }

        let order = fill.order;
        if order.role == OrderRole::Hedge {
            debug!(order_id, price, volume = fill.volume, "Hedge order filled");
            return;
        }
        if fill.volume == 0 {
            return;
        }

        self.position.on_fill(order.side, fill.volume);
        Metrics::position(self.position.position());
        debug!(
            order_id,
            side = order.side.quote_label(),
            price,
            volume = fill.volume,
            remaining = order.remaining,
            position = self.position.position(),
            "Quote filled"
        );

        let hedge_book = self.books.ladder(Instrument::Hedge);
        let filled = fill.volume;
        match self
            .hedger
            .on_fill(order.side, price, filled, &hedge_book, &mut self.lifecycle)
        {
            Ok(hedge) => {
                self.hedges_sent += 1;
                self.dispatch(&hedge.into());
            }
            Err(e) => {
                self.hedges_aborted += 1;
                Metrics::hedge_aborted();
                error!(
                    order_id,
                    volume = fill.volume,
                    hedge_book_age_ms = ?self.books.age_ms(Instrument::Hedge),
                    error = %e,
                    "Hedge aborted"
                );
            }
        }
    }

    /// Handle an order status report.
    ///
    /// Fees are recorded for any order this engine issued, including one
    /// already resolved by its fills.
    pub fn on_order_status(
        &mut self,
        order_id: OrderId,
        fill_volume: Volume,
        remaining_volume: Volume,
        fees: i64,
    ) {
        if self.lifecycle.issued(order_id) {
            self.position.record_fees(fees);
        }
        debug!(
            order_id,
            fill_volume,
            remaining_volume,
            fees,
            "Order status"
        );

        if let Some(res) = self.lifecycle.on_order_status(order_id, remaining_volume) {
            self.record_resolution(&res);
        }
    }

    /// Handle a venue error. Errors tied to an order resolve that order.
    pub fn on_error(&mut self, order_id: OrderId, message: &str) {
        Metrics::venue_error();
        warn!(order_id, message, "Venue error");
        if order_id != 0 {
            self.on_order_status(order_id, 0, 0, 0);
        }
    }

    /// Current state summary.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            position: self.position.position(),
            bid: *self.lifecycle.slot(OrderSide::Buy),
            ask: *self.lifecycle.slot(OrderSide::Sell),
            last_bid_target: self.last_quotes.bid,
            last_ask_target: self.last_quotes.ask,
            tracked_orders: self.lifecycle.tracked_count(),
            next_order_id: self.lifecycle.next_order_id(),
            fill_count: self.position.fill_count(),
            bought_volume: self.position.bought_volume(),
            sold_volume: self.position.sold_volume(),
            fees: self.position.fees(),
            hedges_sent: self.hedges_sent,
            hedges_aborted: self.hedges_aborted,
        }
    }

    pub fn position(&self) -> Position {
        self.position.position()
    }

    pub fn lifecycle(&self) -> &OrderLifecycleManager {
        &self.lifecycle
    }

    pub fn books(&self) -> &OrderBookStore {
        &self.books
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn config(&self) -> &MakerConfig {
        &self.config
    }

    fn record_resolution(&self, res: &Resolution) {
        if res.freed_slot {
            Metrics::slot_resolved(res.order.side.quote_label());
        }
    }

    fn dispatch(&self, request: &OrderRequest) {
        match request {
            OrderRequest::Insert(order) => match order.role {
                OrderRole::Quote => Metrics::quote_inserted(order.side.quote_label()),
                OrderRole::Hedge => {
                    let side = order.side.to_string();
                    Metrics::hedge_sent(&side);
                }
            },
            OrderRequest::Cancel(cancel) => {
                if let Some(order) = self.lifecycle.lookup(cancel.order_id) {
                    Metrics::cancel_sent(order.side.quote_label());
                }
            }
        }
        self.gateway.send(request);
    }
}
