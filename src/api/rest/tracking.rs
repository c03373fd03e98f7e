use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::api::rest::extract::AppQuery;
use crate::error::AppError;
use crate::flows::tracking::{self, TrackingView};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/tracking", get(track_order))
}

#[derive(Deserialize)]
pub struct TrackingQuery {
    #[serde(default)]
    pub order_number: String,
}

async fn track_order(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<TrackingQuery>,
) -> Result<Json<TrackingView>, AppError> {
    let view = tracking::track(&state.remote, &state.metrics, &query.order_number).await?;
    Ok(Json(view))
}
