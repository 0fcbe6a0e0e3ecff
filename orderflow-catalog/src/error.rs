use orderflow_shared::ProductId;

use crate::inventory::InventoryError;

/// Catalog-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Product already exists: {0}")]
    DuplicateProduct(ProductId),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}
