use orderflow_order::{CheckoutNotifier, Order, TracingNotifier};
use orderflow_shared::OrderPlacedEvent;
use tokio::sync::broadcast;
use tracing::debug;

/// Publishes every placed order to `/api/events` subscribers, and logs it.
pub struct BroadcastNotifier {
    tx: broadcast::Sender<OrderPlacedEvent>,
}

impl BroadcastNotifier {
    pub fn new(tx: broadcast::Sender<OrderPlacedEvent>) -> Self {
        Self { tx }
    }
}

impl CheckoutNotifier for BroadcastNotifier {
    fn order_placed(&self, order: &Order) {
        TracingNotifier.order_placed(order);
        // No subscribers is not an error
        if self.tx.send(order.to_event()).is_err() {
            debug!(order_id = %order.id, "no event subscribers");
        }
    }
}
