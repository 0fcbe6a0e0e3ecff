use orderflow_shared::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::inventory::StockLevel;

/// Core product structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(flatten)]
    pub stock: StockLevel,
    pub image: String,
}

impl Product {
    /// Build a product from a validated draft. Nothing is reserved yet.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Result<Self, CatalogError> {
        draft.validate()?;
        Ok(Self {
            id,
            name: draft.name,
            price: draft.price,
            stock: StockLevel::new(draft.stock),
            image: draft.image,
        })
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock.available() > 0
    }

    /// Apply a catalog edit. Name, price and image are replaced; the stock
    /// total is resized around whatever carts currently hold.
    pub fn apply(&mut self, draft: ProductDraft) -> Result<(), CatalogError> {
        draft.validate()?;

        let mut stock = self.stock;
        stock.resize(draft.stock)?;

        self.name = draft.name;
        self.price = draft.price;
        self.image = draft.image;
        self.stock = stock;
        Ok(())
    }
}

/// Highest accepted unit price.
///
/// Keeps `price × u32::MAX` and any realistic sum of such line subtotals
/// well inside `Decimal`'s range, so cart arithmetic cannot overflow.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Editable product fields, as submitted by catalog management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    #[serde(default)]
    pub image: String,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
            image: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidProduct("name must not be empty".to_string()));
        }
        if self.price < Decimal::ZERO {
            return Err(CatalogError::InvalidProduct(format!(
                "price must not be negative, got {}",
                self.price
            )));
        }
        if self.price > MAX_PRICE {
            return Err(CatalogError::InvalidProduct(format!(
                "price must not exceed {}, got {}",
                MAX_PRICE, self.price
            )));
        }
        Ok(())
    }
}
