//! Presentation model for the map: tile layers, markers, the historical
//! overlay and the side-by-side comparison view.
//!
//! Nothing here draws. A renderer reads these values and reports pointer
//! and viewport events back.

use crate::map_state::Viewport;
use crate::site::Site;

// ---------------------------------------------------------------------------
// Base layers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Tile layer under the markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BaseLayer {
    #[default]
    Default,
    Satellite,
}

impl BaseLayer {
    /// Tile URL template. The dark default layer expects an
    /// `{accessToken}` option from the renderer.
    pub fn tile_url(self, theme: Theme) -> &'static str {
        match (self, theme) {
            (BaseLayer::Default, Theme::Light) => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            (BaseLayer::Default, Theme::Dark) => {
                "https://tile.jawg.io/jawg-dark/{z}/{x}/{y}{r}.png?access-token={accessToken}"
            }
            (BaseLayer::Satellite, _) => "https://mt1.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
        }
    }

    pub fn attribution(self, theme: Theme) -> &'static str {
        match (self, theme) {
            (BaseLayer::Default, Theme::Light) => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            }
            (BaseLayer::Default, Theme::Dark) => {
                "&copy; <a href=\"https://www.jawg.io\" target=\"_blank\">&copy; Jawg</a> - &copy; <a href=\"https://www.openstreetmap.org\" target=\"_blank\">&copy; OpenStreetMap</a>"
            }
            (BaseLayer::Satellite, _) => "&copy; Google",
        }
    }

    /// Label shown on the layer switcher.
    pub fn label(self) -> &'static str {
        match self {
            BaseLayer::Default => "Карта",
            BaseLayer::Satellite => "Спутник",
        }
    }

    /// The layer the switcher offers while `self` is active.
    pub fn alternate(self) -> BaseLayer {
        match self {
            BaseLayer::Default => BaseLayer::Satellite,
            BaseLayer::Satellite => BaseLayer::Default,
        }
    }
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

pub const DEFAULT_MARKER_ICON: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon.png";

/// Pixel size and anchor of a marker icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    pub url: String,
    pub size: [u32; 2],
    pub anchor: [i32; 2],
    pub popup_anchor: Option<[i32; 2]>,
}

impl MarkerIcon {
    /// `/icons/<name>` for sites with their own icon, the stock pin otherwise.
    pub fn for_site(icon: Option<&str>) -> Self {
        match icon.filter(|name| !name.is_empty()) {
            Some(name) => Self {
                url: format!("/icons/{name}"),
                size: [25, 41],
                anchor: [12, 10],
                popup_anchor: None,
            },
            None => Self {
                url: DEFAULT_MARKER_ICON.to_string(),
                size: [25, 41],
                anchor: [12, 41],
                popup_anchor: Some([1, -34]),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub site_id: String,
    pub position: [f64; 2],
    pub title: String,
    pub icon: MarkerIcon,
}

/// One marker per site, in list order. Site coordinates are validated when
/// the site is built, so every site is placeable.
pub fn markers(sites: &[&Site]) -> Vec<Marker> {
    sites
        .iter()
        .map(|site| Marker {
            site_id: site.id.clone(),
            position: site.coordinates.to_array(),
            title: site.name.clone(),
            icon: MarkerIcon::for_site(site.icon.as_deref()),
        })
        .collect()
}

/// Resolve a clicked marker back to its site.
pub fn marker_click<'a>(sites: &[&'a Site], site_id: &str) -> Option<&'a Site> {
    sites.iter().copied().find(|site| site.id == site_id)
}

// ---------------------------------------------------------------------------
// Historical overlay
// ---------------------------------------------------------------------------

/// Axis-aligned `[lat, lng]` rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: [f64; 2],
    pub north_east: [f64; 2],
}

impl Bounds {
    pub fn contains(&self, point: [f64; 2]) -> bool {
        (self.south_west[0]..=self.north_east[0]).contains(&point[0])
            && (self.south_west[1]..=self.north_east[1]).contains(&point[1])
    }

    /// Nearest point inside the rectangle.
    pub fn clamp(&self, point: [f64; 2]) -> [f64; 2] {
        [
            point[0].clamp(self.south_west[0], self.north_east[0]),
            point[1].clamp(self.south_west[1], self.north_east[1]),
        ]
    }
}

/// A scanned historical map georeferenced to a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalMap {
    pub id: &'static str,
    pub title: &'static str,
    pub image_url: &'static str,
    pub bounds: Bounds,
}

pub const PETROPAVLOVSK_UEZD_1912: HistoricalMap = HistoricalMap {
    id: "petropavlovskiy-uezd-1912",
    title: "Петропавловский уезд, 1912",
    image_url: "/historical-maps/petropavlovskiy-uezd-1912.jpg",
    bounds: Bounds {
        south_west: [51.538597, 64.347327],
        north_east: [55.784217, 72.030899],
    },
};

pub const HISTORICAL_MAPS: [HistoricalMap; 1] = [PETROPAVLOVSK_UEZD_1912];

/// Overlay toggle, chosen map and opacity percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    pub enabled: bool,
    pub selected_map: String,
    opacity: u8,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            selected_map: PETROPAVLOVSK_UEZD_1912.id.to_string(),
            opacity: 70,
        }
    }
}

/// What the renderer draws for an enabled overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageOverlay {
    pub image_url: &'static str,
    pub bounds: Bounds,
    pub opacity: f64,
}

impl OverlayConfig {
    pub fn opacity_percent(&self) -> u8 {
        self.opacity
    }

    /// Set the opacity percentage, clamped to 0..=100.
    pub fn set_opacity(&mut self, percent: u8) {
        self.opacity = percent.min(100);
    }

    pub fn opacity_fraction(&self) -> f64 {
        f64::from(self.opacity) / 100.0
    }

    /// `None` when disabled or when the selected map is unknown.
    pub fn active_overlay(&self) -> Option<ImageOverlay> {
        if !self.enabled {
            return None;
        }
        let map = HISTORICAL_MAPS
            .iter()
            .find(|map| map.id == self.selected_map)?;
        Some(ImageOverlay {
            image_url: map.image_url,
            bounds: map.bounds,
            opacity: self.opacity_fraction(),
        })
    }
}

// ---------------------------------------------------------------------------
// Comparison view
// ---------------------------------------------------------------------------

pub const COMPARISON_CENTER: [f64; 2] = [54.88, 69.15];
pub const COMPARISON_ZOOM: u8 = 8;
pub const COMPARISON_MIN_ZOOM: u8 = 7;

/// Base layers offered on the modern (left) side of the comparison view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComparisonLayer {
    #[default]
    Standard,
    Satellite,
    Terrain,
    Hybrid,
}

impl ComparisonLayer {
    pub const ALL: [ComparisonLayer; 4] = [
        ComparisonLayer::Standard,
        ComparisonLayer::Satellite,
        ComparisonLayer::Terrain,
        ComparisonLayer::Hybrid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComparisonLayer::Standard => "Standard Map",
            ComparisonLayer::Satellite => "Satellite",
            ComparisonLayer::Terrain => "Terrain",
            ComparisonLayer::Hybrid => "Hybrid",
        }
    }

    pub fn tile_url(self) -> &'static str {
        match self {
            ComparisonLayer::Standard => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            ComparisonLayer::Satellite => "https://{s}.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
            ComparisonLayer::Terrain => "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            ComparisonLayer::Hybrid => "https://{s}.google.com/vt/lyrs=y&x={x}&y={y}&z={z}",
        }
    }

    /// Tile subdomains substituted for `{s}`; empty means the renderer default.
    pub fn subdomains(self) -> &'static [&'static str] {
        match self {
            ComparisonLayer::Satellite | ComparisonLayer::Hybrid => &["mt0", "mt1", "mt2", "mt3"],
            ComparisonLayer::Standard | ComparisonLayer::Terrain => &[],
        }
    }

    pub fn attribution(self) -> &'static str {
        match self {
            ComparisonLayer::Standard => "&copy; OpenStreetMap contributors",
            ComparisonLayer::Satellite => "&copy; Google Satellite",
            ComparisonLayer::Terrain => "&copy; OpenTopoMap contributors",
            ComparisonLayer::Hybrid => "&copy; Google Hybrid",
        }
    }
}

/// Two linked maps: modern tiles on the left, the historical scan on the
/// right. Moving the left map drags the right one along; the right map can
/// be panned on its own. A shared cursor mirrors the pointer on both.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub historical_map: HistoricalMap,
    pub left_layer: ComparisonLayer,
    left: Viewport,
    right: Viewport,
    cursor: [f64; 2],
}

impl Default for ComparisonView {
    fn default() -> Self {
        Self::new(PETROPAVLOVSK_UEZD_1912)
    }
}

impl ComparisonView {
    pub fn new(historical_map: HistoricalMap) -> Self {
        let start = Viewport {
            center: COMPARISON_CENTER,
            zoom: COMPARISON_ZOOM,
        };
        Self {
            historical_map,
            left_layer: ComparisonLayer::default(),
            left: start,
            right: start,
            cursor: COMPARISON_CENTER,
        }
    }

    pub fn left(&self) -> Viewport {
        self.left
    }

    pub fn right(&self) -> Viewport {
        self.right
    }

    pub fn cursor(&self) -> [f64; 2] {
        self.cursor
    }

    /// The left map moved; the right map follows.
    pub fn move_left(&mut self, center: [f64; 2], zoom: u8) {
        self.left = self.constrain(center, zoom);
        self.right = self.left;
    }

    /// The right map moved on its own.
    pub fn move_right(&mut self, center: [f64; 2], zoom: u8) {
        self.right = self.constrain(center, zoom);
    }

    /// The pointer moved over either map.
    pub fn pointer_moved(&mut self, position: [f64; 2]) {
        self.cursor = position;
    }

    fn constrain(&self, center: [f64; 2], zoom: u8) -> Viewport {
        Viewport {
            center: self.historical_map.bounds.clamp(center),
            zoom: zoom.max(COMPARISON_MIN_ZOOM),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
