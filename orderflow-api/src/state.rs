use std::sync::Arc;

use orderflow_core::{CartRepository, OrderRepository, Shop};
use orderflow_shared::OrderPlacedEvent;
use tokio::sync::{broadcast, Mutex};
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    /// One writer at a time; every cart and catalog change goes through here.
    pub shop: Arc<Mutex<Shop>>,
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub events_tx: broadcast::Sender<OrderPlacedEvent>,
}

impl AppState {
    pub fn new(
        shop: Shop,
        carts: Arc<dyn CartRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(100);
        Self {
            shop: Arc::new(Mutex::new(shop)),
            carts,
            orders,
            events_tx,
        }
    }

    /// Write the current cart out. A failed save is logged; the cart
    /// operation that triggered it has already succeeded.
    pub async fn persist_cart(&self, shop: &Shop) {
        let result = if shop.cart().is_empty() {
            self.carts.clear().await
        } else {
            self.carts.save(&shop.cart_records()).await
        };

        if let Err(e) = result {
            warn!(error = %e, "failed to persist cart");
        }
    }
}
