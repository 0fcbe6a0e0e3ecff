use tracing::info;

use crate::models::Order;

/// Receives every order snapshot right after checkout.
///
/// Checkout does not depend on what the notifier does with it.
pub trait CheckoutNotifier: Send + Sync {
    fn order_placed(&self, order: &Order);
}

/// Logs placed orders.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl CheckoutNotifier for TracingNotifier {
    fn order_placed(&self, order: &Order) {
        info!(
            order_id = %order.id,
            lines = order.lines.len(),
            total = %order.total,
            savings = %order.savings,
            "order placed"
        );
    }
}
