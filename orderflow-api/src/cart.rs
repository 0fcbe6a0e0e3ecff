use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use orderflow_order::CartPricing;
use orderflow_shared::ProductId;
use serde::Deserialize;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/cart", get(get_cart).delete(clear_cart))
        .route(
            "/api/cart/items/{product_id}",
            post(add_item).put(set_quantity).delete(remove_line),
        )
}

// Every cart endpoint answers with the freshly priced cart.

/// GET /api/cart
pub async fn get_cart(State(state): State<AppState>) -> Json<CartPricing> {
    let shop = state.shop.lock().await;
    Json(shop.price_cart())
}

/// POST /api/cart/items/{product_id}
pub async fn add_item(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<ProductId>,
) -> Result<Json<CartPricing>, AppError> {
    let mut shop = state.shop.lock().await;
    shop.add_item(&product_id)?;
    state.persist_cart(&shop).await;
    Ok(Json(shop.price_cart()))
}

/// PUT /api/cart/items/{product_id}
pub async fn set_quantity(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<ProductId>,
    AppJson(req): AppJson<SetQuantityRequest>,
) -> Result<Json<CartPricing>, AppError> {
    let mut shop = state.shop.lock().await;
    shop.set_quantity(&product_id, req.quantity)?;
    state.persist_cart(&shop).await;
    Ok(Json(shop.price_cart()))
}

/// DELETE /api/cart/items/{product_id}
pub async fn remove_line(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<ProductId>,
) -> Result<Json<CartPricing>, AppError> {
    let mut shop = state.shop.lock().await;
    shop.remove_line(&product_id)?;
    state.persist_cart(&shop).await;
    Ok(Json(shop.price_cart()))
}

/// DELETE /api/cart
pub async fn clear_cart(State(state): State<AppState>) -> Result<Json<CartPricing>, AppError> {
    let mut shop = state.shop.lock().await;
    shop.clear_cart()?;
    state.persist_cart(&shop).await;
    Ok(Json(shop.price_cart()))
}
