//! Handlers for archaeological sites and their virtual tours.
//!
//! All three endpoints are read-only. Stored records pass through
//! [`enrich`] before leaving the server; list results silently drop
//! records whose coordinates cannot be rendered.

use archmap_core::enrichment::{enrich, EnrichedSite, SiteRecord};
use archmap_core::error::CoreError;
use archmap_core::tour::Tour;
use archmap_core::types::DbId;
use archmap_db::models::location::{LocationDetail, LocationFilter};
use archmap_db::repositories::LocationRepo;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const LIST_FAILED: &str = "Failed to fetch locations";
const GET_FAILED: &str = "Failed to fetch location";
const PANORAMA_FAILED: &str = "Failed to fetch panorama";

/// GET /api/locations
///
/// List enriched locations, optionally filtered by era and/or category name.
///
/// A query string that does not fit the filter shape (e.g. a repeated
/// `era`) is treated as no filter at all.
pub async fn list_locations(
    State(state): State<AppState>,
    query: Result<Query<LocationFilter>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let filter = match query {
        Ok(Query(filter)) => filter,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Ignoring malformed location filter");
            LocationFilter::default()
        }
    };

    let rows = LocationRepo::list(&state.pool, &filter)
        .await
        .map_err(AppError::fetch(LIST_FAILED))?;

    let sites = enrich_renderable(rows);
    tracing::debug!(
        era = ?filter.era,
        category = ?filter.category,
        count = sites.len(),
        "Listed locations",
    );

    Ok(Json(sites))
}

/// GET /api/locations/{id}
pub async fn get_location(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_location_id(&raw_id)?;

    let row = LocationRepo::find_by_id(&state.pool, id)
        .await
        .map_err(AppError::fetch(GET_FAILED))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;

    Ok(Json(enrich(SiteRecord::from(row))))
}

/// GET /api/locations/{id}/panorama
///
/// The location's tour document. 404 when the location does not exist or
/// has no tour.
pub async fn get_location_panorama(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_location_id(&raw_id)?;

    let panorama = LocationRepo::find_panorama(&state.pool, id)
        .await
        .map_err(AppError::fetch(PANORAMA_FAILED))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Panorama",
            id,
        }))?;

    Ok(Json(Tour::from(panorama)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Path ids that are not integers cannot name any location.
fn parse_location_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<DbId>().map_err(|_| AppError::UnknownId {
        entity: "Location",
        raw: raw.to_string(),
    })
}

/// Enrich rows, dropping any whose coordinates cannot be placed on the map.
fn enrich_renderable(rows: Vec<LocationDetail>) -> Vec<EnrichedSite> {
    rows.into_iter()
        .map(SiteRecord::from)
        .filter(|record| {
            let renderable = record.is_renderable();
            if !renderable {
                tracing::warn!(
                    location_id = record.id,
                    lat = record.latitude,
                    lng = record.longitude,
                    "Dropping location with unrenderable coordinates",
                );
            }
            renderable
        })
        .map(enrich)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn row(id: DbId, lat: f64, lng: f64) -> LocationDetail {
        LocationDetail {
            id,
            name: format!("Site {id}"),
            address: None,
            description: None,
            historical_context: None,
            latitude: lat,
            longitude: lng,
            icon: None,
            image: None,
            era_name: "Бронзовый век".into(),
            category_name: "Поселения".into(),
            panorama_id: (id % 2 == 0).then_some(id * 10),
        }
    }

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_location_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_object_ids() {
        let err = parse_location_id("65f1c2a9e4b0a1b2c3d4e5f6").unwrap_err();
        assert_matches!(err, AppError::UnknownId { entity: "Location", ref raw } if raw.len() == 24);
    }

    #[test]
    fn unrenderable_rows_are_dropped() {
        let sites = enrich_renderable(vec![row(1, 54.8, 69.1), row(2, 91.0, 0.0), row(4, 0.0, 0.0)]);
        let ids: Vec<DbId> = sites.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(!sites[0].has_3d_tour);
        assert!(sites[1].has_3d_tour);
        assert_eq!(sites[0].era, "Бронзовый век");
    }
}
