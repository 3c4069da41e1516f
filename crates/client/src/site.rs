//! Client-side site records, normalised from loosely-shaped JSON.

use archmap_core::geo::LatLng;
use serde::Serialize;
use serde_json::Value;

use crate::coords::parse_coordinates;

pub const UNNAMED_SITE: &str = "Unnamed Site";
pub const UNKNOWN_ERA: &str = "Unknown Era";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const NO_DESCRIPTION: &str = "No description available";

/// A site the map can render. Coordinates are always valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub coordinates: LatLng,
    pub era: String,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub images: Vec<String>,
    #[serde(rename = "has3DTour")]
    pub has_3d_tour: bool,
}

impl Site {
    /// Normalise one raw list entry.
    ///
    /// Returns `None` (with a warning) when the coordinates cannot be
    /// parsed. Every other missing or empty field takes a default; a site
    /// without an id gets a generated `site-<uuid>` one.
    pub fn from_json(raw: &Value) -> Option<Self> {
        let name = text(raw, "name");

        let Some(coordinates) = raw.get("coordinates").and_then(parse_coordinates) else {
            tracing::warn!(
                site = name.as_deref().unwrap_or(UNNAMED_SITE),
                "Invalid coordinates, skipping site",
            );
            return None;
        };

        let id = match raw.get("id") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => format!("site-{}", uuid::Uuid::new_v4()),
        };

        let images = raw
            .get("images")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            id,
            name: name.unwrap_or_else(|| UNNAMED_SITE.to_string()),
            icon: text(raw, "icon"),
            coordinates,
            era: text(raw, "era").unwrap_or_else(|| UNKNOWN_ERA.to_string()),
            category: text(raw, "category").unwrap_or_else(|| UNCATEGORIZED.to_string()),
            description: text(raw, "description").unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image: text(raw, "image"),
            images,
            has_3d_tour: raw.get("has3DTour").and_then(Value::as_bool).unwrap_or(false),
        })
    }
}

/// Normalise a whole list, dropping unrenderable entries.
pub fn normalize_sites(raw: &[Value]) -> Vec<Site> {
    raw.iter().filter_map(Site::from_json).collect()
}

fn text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
