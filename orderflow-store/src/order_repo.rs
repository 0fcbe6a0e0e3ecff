use async_trait::async_trait;
use orderflow_core::repository::OrderRepository;
use orderflow_order::Order;
use orderflow_shared::OrderId;
use tokio::sync::RwLock;

/// Order history for the lifetime of the process.
#[derive(Default)]
pub struct MemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn save_order(
        &self,
        order: &Order,
    ) -> Result<OrderId, Box<dyn std::error::Error + Send + Sync>> {
        self.orders.write().await.push(order.clone());
        Ok(order.id)
    }

    async fn get_order(
        &self,
        id: OrderId,
    ) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|order| order.id == id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().rev().cloned().collect())
    }
}
