use rust_decimal::Decimal;

use crate::ids::OrderId;

/// Published once per successful checkout.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct OrderPlacedEvent {
    pub order_id: OrderId,
    pub line_count: usize,
    pub unit_count: u32,
    pub total: Decimal,
    pub savings: Decimal,
    pub timestamp: i64,
}
