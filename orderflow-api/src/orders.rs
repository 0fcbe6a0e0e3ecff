use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use orderflow_core::CoreError;
use orderflow_order::Order;
use orderflow_shared::OrderId;

use crate::error::AppError;
use crate::extract::AppPath;
use crate::notifier::BroadcastNotifier;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/checkout", post(checkout))
        .route("/api/orders", get(list_orders))
        .route("/api/orders/{id}", get(get_order))
}

/// POST /api/checkout
/// Freezes the cart into an order, commits stock and empties the cart.
pub async fn checkout(State(state): State<AppState>) -> Result<(StatusCode, Json<Order>), AppError> {
    let mut shop = state.shop.lock().await;
    let notifier = BroadcastNotifier::new(state.events_tx.clone());
    let order = shop.checkout(&notifier)?;
    state.persist_cart(&shop).await;
    drop(shop);

    state
        .orders
        .save_order(&order)
        .await
        .map_err(CoreError::from)?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state.orders.list_orders().await.map_err(CoreError::from)?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    AppPath(id): AppPath<OrderId>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .orders
        .get_order(id)
        .await
        .map_err(CoreError::from)?
        .ok_or(CoreError::UnknownOrder(id))?;
    Ok(Json(order))
}
