use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use orderflow_offer::{Offer, OfferDraft};
use orderflow_shared::OfferId;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/offers", get(list_offers).post(create_offer))
        .route(
            "/api/offers/{id}",
            get(get_offer).put(update_offer).delete(delete_offer),
        )
}

pub async fn list_offers(State(state): State<AppState>) -> Json<Vec<Offer>> {
    let shop = state.shop.lock().await;
    Json(shop.list_offers().to_vec())
}

pub async fn get_offer(
    State(state): State<AppState>,
    AppPath(id): AppPath<OfferId>,
) -> Result<Json<Offer>, AppError> {
    let shop = state.shop.lock().await;
    Ok(Json(shop.offer(&id)?.clone()))
}

pub async fn create_offer(
    State(state): State<AppState>,
    AppJson(draft): AppJson<OfferDraft>,
) -> Result<(StatusCode, Json<Offer>), AppError> {
    let mut shop = state.shop.lock().await;
    let offer = shop.create_offer(draft)?;
    Ok((StatusCode::CREATED, Json(offer)))
}

pub async fn update_offer(
    State(state): State<AppState>,
    AppPath(id): AppPath<OfferId>,
    AppJson(draft): AppJson<OfferDraft>,
) -> Result<Json<Offer>, AppError> {
    let mut shop = state.shop.lock().await;
    Ok(Json(shop.update_offer(&id, draft)?))
}

pub async fn delete_offer(
    State(state): State<AppState>,
    AppPath(id): AppPath<OfferId>,
) -> Result<StatusCode, AppError> {
    let mut shop = state.shop.lock().await;
    shop.delete_offer(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
