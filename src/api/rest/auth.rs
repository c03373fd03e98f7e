use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Serialize;

use crate::api::rest::extract::AppJson;
use crate::api::rest::session::{
    expired_session_cookie, session_cookie, session_id, CurrentSession,
};
use crate::error::AppError;
use crate::flows::auth::{self, Credentials};
use crate::flows::Notice;
use crate::models::session::{visible_sections, Role, Section, Session};
use crate::remote::Registration;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/session", get(current_session))
}

#[derive(Serialize)]
pub struct SessionView {
    pub logged_in: bool,
    pub is_admin: bool,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub sections: Vec<Section>,
}

impl SessionView {
    fn of(session: Option<&Session>) -> Self {
        Self {
            logged_in: session.is_some(),
            is_admin: session.is_some_and(Session::is_admin),
            email: session.map(|session| session.email.clone()),
            role: session.map(|session| session.role),
            sections: visible_sections(session),
        }
    }
}

#[derive(Serialize)]
pub struct AuthView {
    #[serde(flatten)]
    pub session: SessionView,
    pub active_section: Section,
    pub notice: Notice,
}

fn signed_in(session: &Session) -> Response {
    let notice = if session.is_admin() {
        Notice::success("welcome to the admin console")
    } else {
        Notice::success("signed in")
    };

    (
        [(SET_COOKIE, session_cookie(session.id))],
        Json(AuthView {
            session: SessionView::of(Some(session)),
            active_section: session.landing_section(),
            notice,
        }),
    )
        .into_response()
}

async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    AppJson(credentials): AppJson<Credentials>,
) -> Result<Response, AppError> {
    let session = auth::login(&state, &credentials, session_id(&headers))?;
    Ok(signed_in(&session))
}

async fn register(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    AppJson(registration): AppJson<Registration>,
) -> Result<Response, AppError> {
    let session = auth::register(&state, registration, session_id(&headers)).await?;
    Ok(signed_in(&session))
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(id) = session_id(&headers) {
        auth::logout(&state, id);
    }

    (
        [(SET_COOKIE, expired_session_cookie())],
        Json(AuthView {
            session: SessionView::of(None),
            active_section: Section::Home,
            notice: Notice::success("signed out"),
        }),
    )
}

async fn current_session(CurrentSession(session): CurrentSession) -> Json<SessionView> {
    Json(SessionView::of(session.as_ref()))
}
