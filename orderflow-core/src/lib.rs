pub mod repository;
pub mod shop;

use orderflow_catalog::CatalogError;
use orderflow_offer::OfferError;
use orderflow_order::CartError;
use orderflow_shared::OrderId;

pub use repository::{CartRepository, OrderRepository};
pub use shop::Shop;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Offer(#[from] OfferError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error("Order not found: {0}")]
    UnknownOrder(OrderId),
    #[error("Repository failure: {0}")]
    Repository(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Repository(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
