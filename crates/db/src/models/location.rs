//! Archaeological site models and DTOs.

use archmap_core::enrichment::SiteRecord;
use archmap_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub historical_context: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub era_id: DbId,
    pub category_id: DbId,
    pub panorama_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A location joined with its era and category names.
///
/// This is what list and detail queries return; it carries everything the
/// enrichment step needs without further lookups.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocationDetail {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub historical_context: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub era_name: String,
    pub category_name: String,
    pub panorama_id: Option<DbId>,
}

impl From<LocationDetail> for SiteRecord {
    fn from(row: LocationDetail) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            historical_context: row.historical_context,
            latitude: row.latitude,
            longitude: row.longitude,
            icon: row.icon,
            image: row.image,
            era: Some(row.era_name),
            category: Some(row.category_name),
            has_tour: row.panorama_id.is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a location. Taxonomy references are already resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocation {
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub historical_context: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub era_id: DbId,
    pub category_id: DbId,
    pub panorama_id: Option<DbId>,
}

/// Query parameters for `GET /api/locations`.
///
/// Both values are taxonomy names. Empty strings are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationFilter {
    pub era: Option<String>,
    pub category: Option<String>,
}

impl LocationFilter {
    pub fn era_name(&self) -> Option<&str> {
        self.era.as_deref().filter(|s| !s.is_empty())
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }
}
