pub mod health;
pub mod locations;

use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /locations                     list (filter: ?era=&category=)
/// /locations/{id}                get one
/// /locations/{id}/panorama       the location's virtual tour
/// ```
///
/// Unmatched paths under `/api` answer with a JSON 404 instead of falling
/// through to the static front-end.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/locations", locations::router())
        .fallback(handlers::not_found)
}
