use archmap_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
/// Persistence faults are logged with full detail but only the endpoint's
/// fixed message reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `archmap_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error while serving a specific endpoint. `message` is the
    /// fixed text returned to the client.
    #[error("{message}: {source}")]
    Fetch {
        message: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A path id that cannot name any stored entity (e.g. not an integer).
    #[error("Unresolvable {entity} id '{raw}'")]
    UnknownId { entity: &'static str, raw: String },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Adapter for `map_err` that tags a database error with the fixed
    /// client-facing message of the failing endpoint.
    pub fn fetch(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Fetch { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Fetch { message, source } => {
                tracing::error!(error = %source, "{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    message.to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::UnknownId { entity, raw } => {
                tracing::debug!(entity, id = %raw, "Unresolvable id in path");
                (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found"),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
