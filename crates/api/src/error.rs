use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use portal_core::error::CoreError;
use portal_upstream::UpstreamError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as the `{ "error": ..., "code": ... }` envelope.
/// Internal details are logged, never returned to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `portal_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The upstream could not be reached or its response could not be read.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The upstream answered with a non-success status.
    #[error("Upstream responded with {0}")]
    UpstreamStatus(StatusCode),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::SchemaMismatch { schema, reason } => {
                    tracing::error!(schema, reason = %reason, "Upstream response failed schema check");
                    internal()
                }
            },

            AppError::Upstream(UpstreamError::InvalidPathParam { name, .. }) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Invalid path parameter: {name}"),
            ),

            AppError::Upstream(err) => {
                tracing::error!(error = %err, "Upstream call failed");
                internal()
            }

            AppError::UpstreamStatus(status) => (
                *status,
                "UPSTREAM_ERROR",
                "Upstream request failed".to_string(),
            ),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
