use orderflow_catalog::CatalogError;
use orderflow_shared::ProductId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("Product is out of stock: {0}")]
    OutOfStock(ProductId),

    #[error("Stock limit exceeded for {product_id}: requested {requested} more, {available} available")]
    StockLimitExceeded {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Cannot check out an empty cart")]
    EmptyCart,

    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),

    #[error("Product is not in the cart: {0}")]
    NotInCart(ProductId),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error(transparent)]
    Catalog(CatalogError),
}

impl From<CatalogError> for CartError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownProduct(id) => CartError::UnknownProduct(id),
            other => CartError::Catalog(other),
        }
    }
}
