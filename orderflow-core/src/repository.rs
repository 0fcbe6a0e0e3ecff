use async_trait::async_trait;
use orderflow_order::{CartRecord, Order};
use orderflow_shared::OrderId;

/// Persistence for the active cart, as flat `{product_id, quantity,
/// subtotal}` records.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<CartRecord>, Box<dyn std::error::Error + Send + Sync>>;

    async fn save(
        &self,
        records: &[CartRecord],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn clear(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Archive of placed orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn save_order(
        &self,
        order: &Order,
    ) -> Result<OrderId, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_order(
        &self,
        id: OrderId,
    ) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>>;

    /// Newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>>;
}
