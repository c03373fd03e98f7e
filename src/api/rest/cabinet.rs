use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use axum::Router;

use crate::api::rest::session::SignedIn;
use crate::error::AppError;
use crate::flows::cabinet::{self, CabinetView};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/cabinet", get(my_orders))
}

async fn my_orders(
    State(state): State<Arc<AppState>>,
    SignedIn(session): SignedIn,
) -> Result<Json<CabinetView>, AppError> {
    let view = cabinet::load(&state.remote, &session).await?;
    Ok(Json(view))
}
