use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::session::{Role, Session};
use crate::remote::Registration;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// `previous` is the session the browser already holds. It is dropped once the
// new one is open so a repeated sign-in does not leave it behind.
pub fn login(
    state: &AppState,
    credentials: &Credentials,
    previous: Option<Uuid>,
) -> Result<Session, AppError> {
    let email = credentials.email.trim();
    if email.is_empty() || credentials.password.is_empty() {
        return Err(AppError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let role = if state.admin.matches(email, &credentials.password) {
        Role::Admin
    } else {
        Role::User
    };

    Ok(open_session(state, email, role, None, previous))
}

pub async fn register(
    state: &AppState,
    registration: Registration,
    previous: Option<Uuid>,
) -> Result<Session, AppError> {
    if registration.email.trim().is_empty()
        || registration.password.is_empty()
        || registration.name.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "email, password and name are required".to_string(),
        ));
    }

    let user = state
        .remote
        .register(&registration)
        .await
        .map_err(|source| AppError::Failed {
            action: "could not register",
            source,
        })?;

    Ok(open_session(state, &user.email, Role::User, Some(user.id), previous))
}

pub fn logout(state: &AppState, session_id: Uuid) -> bool {
    let removed = state.sessions.remove(&session_id).is_some();
    if removed {
        info!(session_id = %session_id, "signed out");
    }
    record_active(state);
    removed
}

pub fn resume(state: &AppState, session_id: Uuid) -> Option<Session> {
    let session = state.sessions.get(&session_id).map(|entry| entry.value().clone())?;

    if session.is_expired(Utc::now(), state.session_ttl) {
        debug!(session_id = %session_id, "session expired");
        state.sessions.remove(&session_id);
        record_active(state);
        return None;
    }

    Some(session)
}

pub fn sweep_expired(state: &AppState) -> usize {
    let now = Utc::now();
    let before = state.sessions.len();
    state
        .sessions
        .retain(|_, session| !session.is_expired(now, state.session_ttl));
    record_active(state);

    let removed = before.saturating_sub(state.sessions.len());
    if removed > 0 {
        debug!(removed, "expired sessions swept");
    }
    removed
}

fn open_session(
    state: &AppState,
    email: &str,
    role: Role,
    user_id: Option<i64>,
    previous: Option<Uuid>,
) -> Session {
    sweep_expired(state);
    if let Some(previous) = previous {
        state.sessions.remove(&previous);
    }

    let session = Session {
        id: Uuid::new_v4(),
        email: email.to_string(),
        role,
        user_id,
        created_at: Utc::now(),
    };

    state.sessions.insert(session.id, session.clone());
    record_active(state);
    info!(session_id = %session.id, role = ?role, "signed in");

    session
}

fn record_active(state: &AppState) {
    state
        .metrics
        .active_sessions
        .set(state.sessions.len() as i64);
}
