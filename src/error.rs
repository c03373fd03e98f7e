use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::flows::Notice;
use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("sign in required")]
    Unauthorized,

    #[error("admin access required")]
    Forbidden,

    #[error("upstream failure: {0}")]
    Upstream(#[from] RemoteError),

    #[error("{action}: {source}")]
    Failed {
        action: &'static str,
        #[source]
        source: RemoteError,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "sign in required".to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "admin access required".to_string()),
            AppError::Upstream(err) => (StatusCode::BAD_GATEWAY, err.user_message()),
            AppError::Failed { action, source } => (
                StatusCode::BAD_GATEWAY,
                format!("{action}: {}", source.user_message()),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "notice": Notice::error(message.clone()),
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::Value;

    use super::AppError;

    #[tokio::test]
    async fn error_body_carries_a_notice() {
        let response = AppError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "admin access required");
        assert_eq!(body["notice"]["level"], "error");
        assert_eq!(body["notice"]["message"], "admin access required");
    }
}
