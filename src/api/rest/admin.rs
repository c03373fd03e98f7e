use std::sync::Arc;

use axum::extract::State;
use axum::routing::{delete, get, post, put};
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::api::rest::extract::{AppJson, AppPath};
use crate::api::rest::session::AdminSession;
use crate::error::AppError;
use crate::flows::admin::{self, AdminSnapshot, AdminView};
use crate::models::content::{FaqUpdate, Settings};
use crate::models::order::OrderStatus;
use crate::models::point::{NewDeliveryPoint, NewPickupPoint, PickupPoint};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin", get(snapshot))
        .route("/api/admin/faq", post(add_faq))
        .route("/api/admin/faq/:id", put(update_faq).delete(delete_faq))
        .route("/api/admin/pickup-points", post(add_pickup_point))
        .route(
            "/api/admin/pickup-points/:id",
            put(update_pickup_point).delete(delete_pickup_point),
        )
        .route("/api/admin/delivery-points", post(add_delivery_point))
        .route("/api/admin/delivery-points/:id", delete(delete_delivery_point))
        .route("/api/admin/statuses", post(add_status))
        .route("/api/admin/statuses/:id", delete(delete_status))
        .route("/api/admin/settings", put(save_settings))
        .route("/api/admin/orders/:id/status", put(update_order_status))
}

#[derive(Deserialize)]
pub struct FaqRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub order_position: Option<i64>,
}

#[derive(Deserialize)]
pub struct PointRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    pub status_key: String,
    #[serde(default)]
    pub status_label: String,
    #[serde(default)]
    pub status_color: String,
}

#[derive(Deserialize)]
pub struct OrderStatusRequest {
    pub status: OrderStatus,
}

async fn snapshot(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
) -> Result<Json<AdminSnapshot>, AppError> {
    let snapshot = admin::load_snapshot(&state.remote)
        .await
        .map_err(|source| AppError::Failed {
            action: "could not load the admin console",
            source,
        })?;

    Ok(Json(snapshot))
}

async fn add_faq(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppJson(payload): AppJson<FaqRequest>,
) -> Result<Json<AdminView>, AppError> {
    let view = admin::add_faq(&state.remote, &payload.question, &payload.answer).await?;
    Ok(Json(view))
}

async fn update_faq(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<FaqRequest>,
) -> Result<Json<AdminView>, AppError> {
    let order_position = payload
        .order_position
        .ok_or_else(|| AppError::BadRequest("required: order_position".to_string()))?;
    let update = FaqUpdate {
        id,
        question: payload.question,
        answer: payload.answer,
        order_position,
    };

    Ok(Json(admin::update_faq(&state.remote, update).await?))
}

async fn delete_faq(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppPath(id): AppPath<i64>,
) -> Result<Json<AdminView>, AppError> {
    Ok(Json(admin::delete_faq(&state.remote, id).await?))
}

async fn add_pickup_point(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppJson(payload): AppJson<PointRequest>,
) -> Result<Json<AdminView>, AppError> {
    let point = NewPickupPoint {
        name: payload.name,
        address: payload.address,
    };

    Ok(Json(admin::add_pickup_point(&state.remote, point).await?))
}

async fn update_pickup_point(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<PointRequest>,
) -> Result<Json<AdminView>, AppError> {
    let point = PickupPoint {
        id,
        name: payload.name,
        address: payload.address,
    };

    Ok(Json(admin::update_pickup_point(&state.remote, point).await?))
}

async fn delete_pickup_point(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppPath(id): AppPath<i64>,
) -> Result<Json<AdminView>, AppError> {
    Ok(Json(admin::delete_pickup_point(&state.remote, id).await?))
}

async fn add_delivery_point(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppJson(payload): AppJson<NewDeliveryPoint>,
) -> Result<Json<AdminView>, AppError> {
    Ok(Json(admin::add_delivery_point(&state.remote, payload).await?))
}

async fn delete_delivery_point(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppPath(id): AppPath<i64>,
) -> Result<Json<AdminView>, AppError> {
    Ok(Json(admin::delete_delivery_point(&state.remote, id).await?))
}

async fn add_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppJson(payload): AppJson<StatusRequest>,
) -> Result<Json<AdminView>, AppError> {
    let view = admin::add_status(
        &state.remote,
        &payload.status_key,
        &payload.status_label,
        &payload.status_color,
    )
    .await?;

    Ok(Json(view))
}

async fn delete_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppPath(id): AppPath<i64>,
) -> Result<Json<AdminView>, AppError> {
    Ok(Json(admin::delete_status(&state.remote, id).await?))
}

async fn save_settings(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppJson(settings): AppJson<Settings>,
) -> Result<Json<AdminView>, AppError> {
    Ok(Json(admin::save_settings(&state.remote, settings).await?))
}

async fn update_order_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<OrderStatusRequest>,
) -> Result<Json<AdminView>, AppError> {
    let view = admin::update_order_status(&state.remote, id, payload.status).await?;
    Ok(Json(view))
}
