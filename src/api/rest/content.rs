use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;

use crate::error::AppError;
use crate::models::content::{ContactLink, FaqItem, Settings};
use crate::models::point::{DeliveryPoint, PickupPoint};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/faq", get(faq))
        .route("/api/settings", get(settings))
        .route("/api/contacts", get(contacts))
        .route("/api/pickup-points", get(pickup_points))
        .route("/api/delivery-points", get(delivery_points))
}

async fn faq(State(state): State<Arc<AppState>>) -> Result<Json<Vec<FaqItem>>, AppError> {
    Ok(Json(state.remote.list_faq().await?))
}

async fn settings(State(state): State<Arc<AppState>>) -> Result<Json<Settings>, AppError> {
    Ok(Json(state.remote.get_settings().await?))
}

#[derive(Serialize)]
struct ContactsView {
    company_name: String,
    support_phone: String,
    links: Vec<ContactLink>,
}

async fn contacts(State(state): State<Arc<AppState>>) -> Result<Json<ContactsView>, AppError> {
    let settings = state.remote.get_settings().await?;

    Ok(Json(ContactsView {
        links: settings.contact_links(),
        company_name: settings.company_name,
        support_phone: settings.support_phone,
    }))
}

async fn pickup_points(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PickupPoint>>, AppError> {
    Ok(Json(state.remote.list_pickup_points().await?))
}

async fn delivery_points(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DeliveryPoint>>, AppError> {
    Ok(Json(state.remote.list_delivery_points().await?))
}
