//! Outbound order gateway.
//!
//! Provides a trait-based seam between the engine and the venue session.
//! Insert and cancel are fire-and-forget: the engine never waits for an
//! acknowledgement and only learns the outcome from later events.

use std::sync::Arc;

use pairmm_core::{CancelOrder, InsertOrder, OrderId, OrderRequest};
use tracing::info;

/// Trait for sending order requests to the venue.
pub trait OrderGateway: Send + Sync {
    /// Submit a new order.
    fn insert_order(&self, order: &InsertOrder);

    /// Request cancellation of a working order.
    fn cancel_order(&self, order_id: OrderId);

    /// Route any request to the matching call.
    fn send(&self, request: &OrderRequest) {
        match request {
            OrderRequest::Insert(order) => self.insert_order(order),
            OrderRequest::Cancel(cancel) => self.cancel_order(cancel.order_id),
        }
    }
}

impl<G: OrderGateway + ?Sized> OrderGateway for Arc<G> {
    fn insert_order(&self, order: &InsertOrder) {
        (**self).insert_order(order)
    }

    fn cancel_order(&self, order_id: OrderId) {
        (**self).cancel_order(order_id)
    }
}

/// Gateway that records every request instead of sending it.
///
/// Used by tests and by the replay binary.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    sent: parking_lot::Mutex<Vec<OrderRequest>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests recorded so far, oldest first.
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.sent.lock().clone()
    }

    /// Drain recorded requests.
    pub fn take(&self) -> Vec<OrderRequest> {
        std::mem::take(&mut *self.sent.lock())
    }

    /// Recorded inserts only.
    pub fn inserts(&self) -> Vec<InsertOrder> {
        self.sent
            .lock()
            .iter()
            .filter_map(|r| r.as_insert().cloned())
            .collect()
    }

    /// Recorded cancel order ids only.
    pub fn cancels(&self) -> Vec<OrderId> {
        self.sent
            .lock()
            .iter()
            .filter(|r| r.is_cancel())
            .map(OrderRequest::order_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }
}

impl OrderGateway for RecordingGateway {
    fn insert_order(&self, order: &InsertOrder) {
        info!(
            order_id = order.order_id,
            side = %order.side,
            price = order.price,
            volume = order.volume,
            lifespan = %order.lifespan,
            role = %order.role,
            "insert_order"
        );
        self.sent.lock().push(order.clone().into());
    }

    fn cancel_order(&self, order_id: OrderId) {
        info!(order_id, "cancel_order");
        self.sent.lock().push(CancelOrder::new(order_id).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmm_core::{Lifespan, OrderSide};

    #[test]
    fn test_recording_gateway_records_in_order() {
        let gw = RecordingGateway::new();
        let quote = InsertOrder::quote(1, OrderSide::Buy, 10100, 100, Lifespan::GoodForDay);
        gw.insert_order(&quote);
        gw.cancel_order(1);

        assert_eq!(gw.len(), 2);
        assert_eq!(gw.inserts().len(), 1);
        assert_eq!(gw.cancels(), vec![1]);
        assert_eq!(gw.requests()[1], OrderRequest::Cancel(CancelOrder::new(1)));
    }

    #[test]
    fn test_send_routes_requests() {
        let gw = RecordingGateway::new();
        gw.send(&CancelOrder::new(4).into());
        let hedge = InsertOrder::hedge(5, OrderSide::Sell, 10300, 100, Lifespan::FillAndKill);
        gw.send(&hedge.into());
        assert_eq!(gw.cancels(), vec![4]);
        assert_eq!(gw.inserts()[0].order_id, 5);
    }

    #[test]
    fn test_take_drains() {
        let gw = RecordingGateway::new();
        gw.cancel_order(1);
        assert_eq!(gw.take().len(), 1);
        assert!(gw.is_empty());
    }

    #[test]
    fn test_arc_gateway_shares_recording() {
        let gw = Arc::new(RecordingGateway::new());
        let shared: Arc<RecordingGateway> = Arc::clone(&gw);
        shared.cancel_order(2);
        assert_eq!(gw.cancels(), vec![2]);
    }
}
