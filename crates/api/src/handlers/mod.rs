//! Request handlers.
//!
//! Handlers delegate to the repositories in `archmap_db`, shape results
//! with `archmap_core`, and map errors via [`AppError`](crate::error::AppError).

pub mod locations;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Fallback for unmatched paths under `/api`.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found", "code": "NOT_FOUND" })),
    )
}
