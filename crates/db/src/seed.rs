//! One-time bulk import of sites and tours from static JSON fixtures.
//!
//! The import replaces all existing locations and panoramas. Cross
//! references are established by name: a location gets the tour whose name
//! equals its own, eras and categories are matched against the lookup
//! tables, and unknown taxonomy names fall back to [`Era::FALLBACK`] /
//! [`Category::FALLBACK`]. Locations with unrenderable coordinates are
//! skipped rather than aborting the import.

use std::collections::HashMap;

use archmap_core::geo;
use archmap_core::taxonomy::{Category, Era};
use archmap_core::tour::{Scene, Tour};
use archmap_core::types::DbId;
use indexmap::IndexMap;
use serde::Deserialize;
use sqlx::PgPool;

use crate::models::location::CreateLocation;
use crate::models::panorama::{CreatePanorama, Panorama};
use crate::repositories::{CategoryRepo, EraRepo, LocationRepo, PanoramaRepo};

// ---------------------------------------------------------------------------
// Fixture shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FixtureCoordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One entry of the locations fixture.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFixture {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub historical_context: Option<String>,
    pub coordinates: FixtureCoordinates,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub era: Option<String>,
}

/// One entry of the panoramas fixture. Scenes are keyed by id; key order is
/// kept as the tour's scene order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanoramaFixture {
    pub name: String,
    pub initial_panorama: String,
    #[serde(default)]
    pub panoramas: IndexMap<String, Scene>,
}

/// Both fixture files, parsed.
#[derive(Debug, Clone, Default)]
pub struct SeedFixture {
    pub locations: Vec<LocationFixture>,
    pub panoramas: Vec<PanoramaFixture>,
}

impl SeedFixture {
    /// Parse the two fixture documents.
    pub fn from_json(locations: &str, panoramas: &str) -> Result<Self, SeedError> {
        Ok(Self {
            locations: serde_json::from_str(locations)?,
            panoramas: serde_json::from_str(panoramas)?,
        })
    }
}

/// Outcome counters for a completed import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub panoramas_created: usize,
    pub locations_created: usize,
    pub locations_skipped: usize,
    pub panoramas_linked: usize,
    pub dangling_hotspots: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Invalid fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The lookup tables lack a fallback taxon (migrations not applied?).
    #[error("Taxonomy table is missing '{0}'")]
    MissingTaxon(&'static str),
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Replace all locations and panoramas with the fixture contents.
///
/// Runs in a single transaction: either the whole fixture lands or nothing
/// changes.
pub async fn run(pool: &PgPool, fixture: &SeedFixture) -> Result<SeedReport, SeedError> {
    let eras: HashMap<String, DbId> = EraRepo::list_all(pool)
        .await?
        .into_iter()
        .map(|t| (t.name, t.id))
        .collect();
    let categories: HashMap<String, DbId> = CategoryRepo::list_all(pool)
        .await?
        .into_iter()
        .map(|t| (t.name, t.id))
        .collect();

    let fallback_era = *eras
        .get(Era::FALLBACK.name())
        .ok_or(SeedError::MissingTaxon(Era::FALLBACK.name()))?;
    let fallback_category = *categories
        .get(Category::FALLBACK.name())
        .ok_or(SeedError::MissingTaxon(Category::FALLBACK.name()))?;

    let mut report = SeedReport::default();
    let mut tx = pool.begin().await?;

    let removed_locations = LocationRepo::delete_all_inner(&mut tx).await?;
    let removed_panoramas = PanoramaRepo::delete_all_inner(&mut tx).await?;
    tracing::info!(removed_locations, removed_panoramas, "Cleared existing data");

    // Panoramas first so locations can reference them.
    let mut panoramas: Vec<Panorama> = Vec::with_capacity(fixture.panoramas.len());
    for entry in &fixture.panoramas {
        let input = CreatePanorama {
            name: entry.name.clone(),
            initial_panorama: entry.initial_panorama.clone(),
            scenes: entry.panoramas.values().cloned().collect(),
        };
        let panorama = PanoramaRepo::insert_inner(&mut tx, &input).await?;

        let tour = Tour::from(panorama.clone());
        if tour.initial_scene().is_none() {
            tracing::warn!(
                tour = %tour.name,
                initial = %tour.initial_panorama,
                "Initial scene does not exist in tour",
            );
        }
        for dangling in tour.dangling_hotspots() {
            tracing::warn!(
                tour = %tour.name,
                scene = %dangling.scene_id,
                hotspot = %dangling.hotspot_id,
                target = %dangling.target,
                "Hotspot targets a missing scene",
            );
            report.dangling_hotspots += 1;
        }

        panoramas.push(panorama);
        report.panoramas_created += 1;
    }

    let mut location_ids: HashMap<&str, DbId> = HashMap::new();
    for entry in &fixture.locations {
        let FixtureCoordinates { lat, lng } = entry.coordinates;
        if let Err(reason) = geo::validate_coordinates(lat, lng) {
            tracing::warn!(location = %entry.name, %reason, "Skipping location");
            report.locations_skipped += 1;
            continue;
        }

        let era_id = resolve(&eras, entry.era.as_deref(), fallback_era);
        let category_id = resolve(&categories, entry.category.as_deref(), fallback_category);
        let panorama_id = panoramas
            .iter()
            .find(|p| p.name == entry.name)
            .map(|p| p.id);

        let input = CreateLocation {
            name: entry.name.clone(),
            address: entry.address.clone(),
            description: entry.description.clone(),
            historical_context: entry.historical_context.clone(),
            latitude: lat,
            longitude: lng,
            icon: entry.icon.clone(),
            image: entry.image.clone(),
            era_id,
            category_id,
            panorama_id,
        };
        let location = LocationRepo::insert_inner(&mut tx, &input).await?;
        location_ids.entry(entry.name.as_str()).or_insert(location.id);
        report.locations_created += 1;
    }

    for panorama in &panoramas {
        if let Some(&location_id) = location_ids.get(panorama.name.as_str()) {
            if PanoramaRepo::set_location_inner(&mut tx, panorama.id, location_id).await? {
                report.panoramas_linked += 1;
            }
        }
    }

    tx.commit().await?;

    tracing::info!(
        panoramas = report.panoramas_created,
        locations = report.locations_created,
        skipped = report.locations_skipped,
        linked = report.panoramas_linked,
        "Seed completed",
    );

    Ok(report)
}

/// Look up a taxon id by name, falling back when the name is absent or unknown.
fn resolve(ids: &HashMap<String, DbId>, name: Option<&str>, fallback: DbId) -> DbId {
    name.and_then(|n| ids.get(n)).copied().unwrap_or(fallback)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
