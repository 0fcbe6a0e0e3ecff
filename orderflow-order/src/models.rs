use chrono::{DateTime, Utc};
use orderflow_shared::{OrderId, OrderPlacedEvent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{CartPricing, PricedLine};

/// Snapshot of a cart taken at checkout. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub lines: Vec<PricedLine>,
    pub total: Decimal,
    pub original_total: Decimal,
    pub savings: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn from_pricing(pricing: CartPricing) -> Self {
        Self {
            id: OrderId::new(),
            lines: pricing.lines,
            total: pricing.totals.total,
            original_total: pricing.totals.original_total,
            savings: pricing.totals.savings,
            created_at: Utc::now(),
        }
    }

    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn to_event(&self) -> OrderPlacedEvent {
        OrderPlacedEvent {
            order_id: self.id,
            line_count: self.lines.len(),
            unit_count: self.unit_count(),
            total: self.total,
            savings: self.savings,
            timestamp: self.created_at.timestamp(),
        }
    }
}
