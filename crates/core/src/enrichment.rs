//! Site enrichment: maps a stored site record into the API response shape.
//!
//! Enrichment never fails. Missing optional fields degrade to fixed
//! placeholders, and every enriched site carries the same feature list and
//! visiting information block.

use serde::{Deserialize, Serialize};

use crate::geo;
use crate::types::DbId;

/// Image shown for sites without a photo of their own.
pub const PLACEHOLDER_IMAGE: &str = "https://images.pexels.com/photos/36006/renaissance-schallaburg-figures-facade.jpg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1";

pub const PLACEHOLDER_DESCRIPTION: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

pub const PLACEHOLDER_HISTORICAL_CONTEXT: &str =
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";

/// Taxonomy name used when a record has no resolved era or category.
pub const UNKNOWN_TAXON: &str = "Unknown";

pub const SITE_FEATURES: [&str; 4] = [
    "Original architectural elements",
    "Well-preserved structures",
    "Archaeological evidence",
    "Cultural significance",
];

pub const OPENING_HOURS: &str = "Dawn to dusk";
pub const ADMISSION: &str = "Free";
pub const FACILITIES: [&str; 2] = ["Parking", "Information boards"];
pub const ACCESSIBILITY: &str = "Moderate";

// ---------------------------------------------------------------------------
// Input / output shapes
// ---------------------------------------------------------------------------

/// A site as read from storage, with taxonomy references already resolved
/// to names.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteRecord {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub historical_context: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub era: Option<String>,
    pub category: Option<String>,
    pub has_tour: bool,
}

impl SiteRecord {
    /// Whether the record's coordinates can be placed on the map.
    pub fn is_renderable(&self) -> bool {
        geo::is_renderable(self.latitude, self.longitude)
    }
}

/// Practical information shown in the site detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitingInfo {
    pub opening_hours: String,
    pub admission: String,
    pub facilities: Vec<String>,
    pub accessibility: String,
}

impl Default for VisitingInfo {
    fn default() -> Self {
        Self {
            opening_hours: OPENING_HOURS.to_string(),
            admission: ADMISSION.to_string(),
            facilities: FACILITIES.iter().map(|f| f.to_string()).collect(),
            accessibility: ACCESSIBILITY.to_string(),
        }
    }
}

/// A site in the API response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedSite {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub historical_context: String,
    /// `[latitude, longitude]`.
    pub coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub image: String,
    pub category: String,
    pub era: String,
    #[serde(rename = "has3DTour")]
    pub has_3d_tour: bool,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub visiting_info: VisitingInfo,
}

impl From<EnrichedSite> for SiteRecord {
    fn from(site: EnrichedSite) -> Self {
        let [latitude, longitude] = site.coordinates;
        Self {
            id: site.id,
            name: site.name,
            description: Some(site.description),
            historical_context: Some(site.historical_context),
            latitude,
            longitude,
            icon: site.icon,
            image: Some(site.image),
            era: Some(site.era),
            category: Some(site.category),
            has_tour: site.has_3d_tour,
        }
    }
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Map a stored record into the response shape, filling defaults.
pub fn enrich(record: SiteRecord) -> EnrichedSite {
    EnrichedSite {
        id: record.id,
        name: record.name,
        description: or_placeholder(record.description, PLACEHOLDER_DESCRIPTION),
        historical_context: or_placeholder(
            record.historical_context,
            PLACEHOLDER_HISTORICAL_CONTEXT,
        ),
        coordinates: [record.latitude, record.longitude],
        icon: record.icon.filter(|icon| !icon.is_empty()),
        image: or_placeholder(record.image, PLACEHOLDER_IMAGE),
        category: or_placeholder(record.category, UNKNOWN_TAXON),
        era: or_placeholder(record.era, UNKNOWN_TAXON),
        has_3d_tour: record.has_tour,
        features: SITE_FEATURES.iter().map(|f| f.to_string()).collect(),
        visiting_info: VisitingInfo::default(),
    }
}

/// Empty strings count as absent.
fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
