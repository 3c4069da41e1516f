//! Panorama tour models and DTOs.

use archmap_core::tour::{Scene, Tour};
use archmap_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `panoramas` table. Scenes live in a JSONB column.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Panorama {
    pub id: DbId,
    pub name: String,
    pub initial_panorama: String,
    pub location_id: Option<DbId>,
    pub scenes: Json<Vec<Scene>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Panorama> for Tour {
    fn from(row: Panorama) -> Self {
        Self {
            id: row.id,
            name: row.name,
            initial_panorama: row.initial_panorama,
            location_id: row.location_id,
            scenes: row.scenes.0,
        }
    }
}

/// DTO for inserting a panorama tour.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePanorama {
    pub name: String,
    pub initial_panorama: String,
    pub scenes: Vec<Scene>,
}
