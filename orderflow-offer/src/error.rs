use orderflow_shared::{OfferId, ProductId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfferError {
    #[error("Offer not found: {0}")]
    UnknownOffer(OfferId),

    #[error("Offer targets unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error("Invalid offer: {0}")]
    InvalidOffer(String),
}
