use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orderflow_catalog::CatalogError;
use orderflow_core::CoreError;
use orderflow_offer::OfferError;
use orderflow_order::CartError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let msg = err.to_string();
        match err {
            CatalogError::UnknownProduct(_) => AppError::NotFound(msg),
            CatalogError::InvalidProduct(_) => AppError::BadRequest(msg),
            CatalogError::DuplicateProduct(_) | CatalogError::Inventory(_) => {
                AppError::Conflict(msg)
            }
        }
    }
}

impl From<OfferError> for AppError {
    fn from(err: OfferError) -> Self {
        let msg = err.to_string();
        match err {
            OfferError::UnknownOffer(_) | OfferError::UnknownProduct(_) => AppError::NotFound(msg),
            OfferError::InvalidOffer(_) => AppError::BadRequest(msg),
        }
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        let msg = err.to_string();
        match err {
            CartError::OutOfStock(_)
            | CartError::StockLimitExceeded { .. }
            | CartError::EmptyCart => AppError::Conflict(msg),
            CartError::UnknownProduct(_) | CartError::NotInCart(_) => AppError::NotFound(msg),
            CartError::InvalidQuantity(_) => AppError::BadRequest(msg),
            CartError::Catalog(inner) => inner.into(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Catalog(e) => e.into(),
            CoreError::Offer(e) => e.into(),
            CoreError::Cart(e) => e.into(),
            CoreError::UnknownOrder(id) => AppError::NotFound(format!("Order not found: {}", id)),
            CoreError::Repository(msg) => AppError::Internal(msg),
        }
    }
}
