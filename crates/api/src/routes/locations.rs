//! Route definitions for archaeological sites.

use axum::routing::get;
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Location routes mounted at `/locations`.
///
/// ```text
/// GET /                  -> list_locations
/// GET /{id}              -> get_location
/// GET /{id}/panorama     -> get_location_panorama
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(locations::list_locations))
        .route("/{id}", get(locations::get_location))
        .route("/{id}/panorama", get(locations::get_location_panorama))
}
