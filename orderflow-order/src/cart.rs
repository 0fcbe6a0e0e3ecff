use orderflow_catalog::Product;
use orderflow_shared::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product in the active cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// Pre-discount amount: quantity × unit price.
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    pub fn to_record(&self) -> CartRecord {
        CartRecord {
            product_id: self.product_id,
            quantity: self.quantity,
            subtotal: self.subtotal(),
        }
    }
}

/// Flat persistence shape of a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRecord {
    pub product_id: ProductId,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// The active cart: at most one line per product.
///
/// Lines are only added, resized or dropped by the functions in
/// [`crate::workflow`], which keep catalog reservations in step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == *product_id)
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.line(product_id).map_or(0, |line| line.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn to_records(&self) -> Vec<CartRecord> {
        self.lines.iter().map(CartLine::to_record).collect()
    }

    pub(crate) fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    pub(crate) fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == *product_id)
    }

    pub(crate) fn remove(&mut self, product_id: &ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.product_id == *product_id)?;
        Some(self.lines.remove(index))
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }
}
