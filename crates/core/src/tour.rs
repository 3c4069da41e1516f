//! Panorama tour definitions: a tour owns its scenes, a scene owns its
//! hotspots.
//!
//! Hotspot targets are not validated when a tour is loaded. A `panorama`
//! hotspot pointing at a missing scene only surfaces when someone navigates
//! through it; [`Tour::dangling_hotspots`] lets import tooling report them
//! ahead of time.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// What happens when a hotspot is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotKind {
    /// Move to another scene of the same tour.
    Panorama,
    /// Show an image overlay on top of the current scene.
    Image,
}

/// A clickable angular position within a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    #[serde(rename = "type")]
    pub kind: HotspotKind,
    pub id: String,
    /// Scene id for `panorama` hotspots.
    #[serde(default)]
    pub target_panorama: String,
    /// Degrees above the horizon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    /// Degrees around the vertical axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Hotspot {
    /// Image shown by an `image` hotspot. Falls back to the target when the
    /// dedicated `image` field is absent or empty.
    pub fn image_url(&self) -> Option<&str> {
        match self.kind {
            HotspotKind::Image => self
                .image
                .as_deref()
                .filter(|url| !url.is_empty())
                .or(Some(self.target_panorama.as_str()))
                .filter(|url| !url.is_empty()),
            HotspotKind::Panorama => None,
        }
    }

    /// `(latitude, longitude)` in radians for the panorama renderer.
    /// Missing angles default to zero.
    pub fn position_radians(&self) -> (f64, f64) {
        (
            self.pitch.unwrap_or(0.0).to_radians(),
            self.yaw.unwrap_or(0.0).to_radians(),
        )
    }
}

/// One 360° image and its hotspots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Stripe-projection source image.
    pub image: String,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

impl Scene {
    pub fn hotspot(&self, hotspot_id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == hotspot_id)
    }
}

/// A named collection of scenes, optionally linked to one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: DbId,
    pub name: String,
    /// Scene shown when the tour opens.
    pub initial_panorama: String,
    #[serde(default)]
    pub location_id: Option<DbId>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

/// A `panorama` hotspot whose target scene does not exist in its tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingHotspot {
    pub scene_id: String,
    pub hotspot_id: String,
    pub target: String,
}

impl Tour {
    pub fn scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == scene_id)
    }

    pub fn initial_scene(&self) -> Option<&Scene> {
        self.scene(&self.initial_panorama)
    }

    /// All `panorama` hotspots that would lead to "scene not found".
    pub fn dangling_hotspots(&self) -> Vec<DanglingHotspot> {
        self.scenes
            .iter()
            .flat_map(|scene| {
                scene
                    .hotspots
                    .iter()
                    .filter(|h| h.kind == HotspotKind::Panorama)
                    .filter(|h| self.scene(&h.target_panorama).is_none())
                    .map(|h| DanglingHotspot {
                        scene_id: scene.id.clone(),
                        hotspot_id: h.id.clone(),
                        target: h.target_panorama.clone(),
                    })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
