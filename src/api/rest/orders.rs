use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use serde_json::json;

use crate::api::rest::extract::{AppJson, AppQuery};
use crate::api::rest::session::CurrentSession;
use crate::flows::order_form::{self, OrderForm, SubmitError};
use crate::flows::Notice;
use crate::models::decimal;
use crate::pricing::{self, Dimensions, Quote};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/orders", post(create_order))
        .route("/api/calculator", get(calculate))
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    AppJson(form): AppJson<OrderForm>,
) -> Response {
    let user_id = session.and_then(|session| session.user_id);

    match order_form::submit(&state.remote, &state.metrics, form, user_id).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(SubmitError::Invalid(err)) => {
            let notice = Notice::error(err.message());
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": notice.message,
                    "missing": err.missing,
                    "notice": notice,
                })),
            )
                .into_response()
        }
        Err(SubmitError::Rejected { error, form }) => {
            let notice = Notice::error(format!("could not create the order: {}", error.user_message()));
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": notice.message,
                    "notice": notice,
                    "form": form,
                })),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CalculatorQuery {
    #[serde(default, deserialize_with = "decimal::optional")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "decimal::optional")]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "decimal::optional")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "decimal::optional")]
    pub height: Option<f64>,
}

async fn calculate(AppQuery(query): AppQuery<CalculatorQuery>) -> Json<Quote> {
    let dimensions = Dimensions::from_parts(query.length, query.width, query.height);
    Json(pricing::quote(
        query.weight.unwrap_or_default(),
        dimensions.as_ref(),
    ))
}
