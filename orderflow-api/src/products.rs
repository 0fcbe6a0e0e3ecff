use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use orderflow_catalog::{Product, ProductDraft};
use orderflow_shared::ProductId;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let shop = state.shop.lock().await;
    Json(shop.list_products().into_iter().cloned().collect())
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<ProductId>,
) -> Result<Json<Product>, AppError> {
    let shop = state.shop.lock().await;
    Ok(Json(shop.product(&id)?.clone()))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(draft): AppJson<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let mut shop = state.shop.lock().await;
    let product = shop.create_product(draft)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
/// Total stock may not drop below what carts currently hold.
pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<ProductId>,
    AppJson(draft): AppJson<ProductDraft>,
) -> Result<Json<Product>, AppError> {
    let mut shop = state.shop.lock().await;
    let product = shop.update_product(&id, draft)?;
    state.persist_cart(&shop).await;
    Ok(Json(product))
}

/// DELETE /api/products/{id}
/// Also drops the product's cart line and the offers scoped to it.
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<ProductId>,
) -> Result<StatusCode, AppError> {
    let mut shop = state.shop.lock().await;
    shop.delete_product(&id)?;
    state.persist_cart(&shop).await;
    Ok(StatusCode::NO_CONTENT)
}
