//! Virtual tour controller: one site's panorama tour, loaded once.
//!
//! ```text
//! Loading ──load ok──▶ Ready { current scene, image overlay }
//!    └────load err──▶ Error(message)
//! ```
//!
//! `Error` is terminal for the controller; the user navigates away to
//! recover. Inside `Ready`, hotspot clicks switch scenes or open an image
//! without touching the network.

use archmap_core::enrichment::EnrichedSite;
use archmap_core::tour::{Hotspot, HotspotKind, Scene, Tour};

use crate::api::LocationsApi;

pub const LOCATION_NOT_FOUND: &str = "Location not found";
pub const PANORAMA_NOT_FOUND: &str = "Panorama not found";
pub const SCENE_NOT_FOUND: &str = "Scene not found";

pub const PANORAMA_HOTSPOT_COLOR: &str = "#2563eb";
pub const IMAGE_HOTSPOT_COLOR: &str = "#d97706";

#[derive(Debug, Clone, PartialEq)]
pub enum TourState {
    Loading,
    Error(String),
    Ready(TourView),
}

/// A loaded tour and the viewer state on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct TourView {
    pub site: EnrichedSite,
    pub tour: Tour,
    current_scene_id: String,
    image_overlay: Option<String>,
}

/// Result of resolving the current scene id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneLookup<'a> {
    Found(&'a Scene),
    /// The id names no scene; the viewer shows [`SCENE_NOT_FOUND`].
    NotFound,
}

/// What a hotspot click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotspotAction {
    Navigated { to: String },
    ImageOpened { url: String },
    /// Unknown hotspot, an image hotspot without an image, or no scene.
    Ignored,
}

/// A hotspot placed on the sphere. Positions are radians.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotMarker {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: &'static str,
    pub tooltip: Option<String>,
    pub kind: HotspotKind,
}

impl HotspotMarker {
    fn from_hotspot(hotspot: &Hotspot) -> Self {
        let (latitude, longitude) = hotspot.position_radians();
        Self {
            id: hotspot.id.clone(),
            latitude,
            longitude,
            color: match hotspot.kind {
                HotspotKind::Panorama => PANORAMA_HOTSPOT_COLOR,
                HotspotKind::Image => IMAGE_HOTSPOT_COLOR,
            },
            tooltip: hotspot.text.clone(),
            kind: hotspot.kind,
        }
    }
}

impl TourView {
    /// Start at the tour's initial scene.
    pub fn new(site: EnrichedSite, tour: Tour) -> Self {
        let current_scene_id = tour.initial_panorama.clone();
        Self {
            site,
            tour,
            current_scene_id,
            image_overlay: None,
        }
    }

    pub fn current_scene_id(&self) -> &str {
        &self.current_scene_id
    }

    pub fn current_scene(&self) -> SceneLookup<'_> {
        match self.tour.scene(&self.current_scene_id) {
            Some(scene) => SceneLookup::Found(scene),
            None => SceneLookup::NotFound,
        }
    }

    /// Image currently shown over the panorama, if any.
    pub fn image_overlay(&self) -> Option<&str> {
        self.image_overlay.as_deref()
    }

    /// `"<site> - <scene>"`, or just the site name without a scene.
    pub fn title(&self) -> String {
        match self.current_scene() {
            SceneLookup::Found(scene) => format!("{} - {}", self.site.name, scene.name),
            SceneLookup::NotFound => self.site.name.clone(),
        }
    }

    /// Handle a click on a hotspot of the current scene.
    ///
    /// Panorama targets are not checked: a missing target leaves the view on
    /// [`SceneLookup::NotFound`].
    pub fn click_hotspot(&mut self, hotspot_id: &str) -> HotspotAction {
        let SceneLookup::Found(scene) = self.current_scene() else {
            return HotspotAction::Ignored;
        };
        let Some(hotspot) = scene.hotspot(hotspot_id) else {
            return HotspotAction::Ignored;
        };

        match hotspot.kind {
            HotspotKind::Panorama => {
                let to = hotspot.target_panorama.clone();
                tracing::debug!(from = %self.current_scene_id, to = %to, "Switching scene");
                self.current_scene_id = to.clone();
                HotspotAction::Navigated { to }
            }
            HotspotKind::Image => match hotspot.image_url() {
                Some(url) => {
                    let url = url.to_string();
                    self.image_overlay = Some(url.clone());
                    HotspotAction::ImageOpened { url }
                }
                None => HotspotAction::Ignored,
            },
        }
    }

    pub fn close_image(&mut self) {
        self.image_overlay = None;
    }

    /// Markers for the current scene's hotspots.
    pub fn markers(&self) -> Vec<HotspotMarker> {
        match self.current_scene() {
            SceneLookup::Found(scene) => scene.hotspots.iter().map(HotspotMarker::from_hotspot).collect(),
            SceneLookup::NotFound => Vec::new(),
        }
    }
}

/// Drives one tour page.
#[derive(Debug)]
pub struct VirtualTourController {
    site_id: String,
    state: TourState,
}

impl VirtualTourController {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            state: TourState::Loading,
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn state(&self) -> &TourState {
        &self.state
    }

    pub fn view(&self) -> Option<&TourView> {
        match &self.state {
            TourState::Ready(view) => Some(view),
            _ => None,
        }
    }

    /// Fetch the site and its tour concurrently. Either failure ends in
    /// [`TourState::Error`]; a failed site lookup takes precedence.
    pub async fn load(&mut self, api: &dyn LocationsApi) {
        self.state = TourState::Loading;

        let (site, tour) = futures::join!(
            api.get_location(&self.site_id),
            api.get_panorama(&self.site_id),
        );

        self.state = match (site, tour) {
            (Ok(site), Ok(tour)) => {
                tracing::debug!(site_id = %self.site_id, scenes = tour.scenes.len(), "Tour loaded");
                TourState::Ready(TourView::new(site, tour))
            }
            (Err(e), _) => {
                tracing::error!(site_id = %self.site_id, error = %e, "Failed to load tour site");
                TourState::Error(LOCATION_NOT_FOUND.to_string())
            }
            (Ok(_), Err(e)) => {
                tracing::error!(site_id = %self.site_id, error = %e, "Failed to load tour");
                TourState::Error(PANORAMA_NOT_FOUND.to_string())
            }
        };
    }

    /// Forwarded to [`TourView::click_hotspot`]; ignored unless ready.
    pub fn click_hotspot(&mut self, hotspot_id: &str) -> HotspotAction {
        match &mut self.state {
            TourState::Ready(view) => view.click_hotspot(hotspot_id),
            _ => HotspotAction::Ignored,
        }
    }

    pub fn close_image(&mut self) {
        if let TourState::Ready(view) = &mut self.state {
            view.close_image();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use archmap_core::enrichment::{enrich, SiteRecord};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::api::LocationQuery;
    use crate::error::ClientError;

    struct FakeApi {
        site: Option<EnrichedSite>,
        tour: Option<Tour>,
        calls: AtomicUsize,
    }

    fn not_found() -> ClientError {
        ClientError::ApiError {
            status: 404,
            body: "{\"error\":\"Location not found\"}".into(),
        }
    }

    #[async_trait]
    impl LocationsApi for FakeApi {
        async fn list_locations(
            &self,
            _query: &LocationQuery,
        ) -> Result<Vec<serde_json::Value>, ClientError> {
            unreachable!("tour page never lists sites")
        }

        async fn get_location(&self, _id: &str) -> Result<EnrichedSite, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.site.clone().ok_or_else(not_found)
        }

        async fn get_panorama(&self, _id: &str) -> Result<Tour, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.tour.clone().ok_or_else(not_found)
        }
    }

    fn site() -> EnrichedSite {
        enrich(SiteRecord {
            id: 3,
            name: "Ботай".into(),
            description: None,
            historical_context: None,
            latitude: 53.3,
            longitude: 67.6,
            icon: None,
            image: None,
            era: Some("Каменный век".into()),
            category: Some("Поселения".into()),
            has_tour: true,
        })
    }

    fn tour() -> Tour {
        serde_json::from_value(json!({
            "id": 9,
            "name": "Ботай",
            "initialPanorama": "entrance",
            "locationId": 3,
            "scenes": [
                { "id": "entrance", "name": "Вход", "image": "/p/entrance.jpg", "hotspots": [
                    { "type": "panorama", "id": "to-yard", "targetPanorama": "yard", "pitch": 0, "yaw": 90, "text": "Во двор" },
                    { "type": "panorama", "id": "to-cellar", "targetPanorama": "cellar" },
                    { "type": "image", "id": "plan", "image": "/img/plan.jpg", "pitch": -10, "yaw": 180 }
                ] },
                { "id": "yard", "name": "Двор", "image": "/p/yard.jpg" }
            ]
        }))
        .unwrap()
    }

    fn api(site: Option<EnrichedSite>, tour: Option<Tour>) -> FakeApi {
        FakeApi {
            site,
            tour,
            calls: AtomicUsize::new(0),
        }
    }

    async fn ready_controller(api: &FakeApi) -> VirtualTourController {
        let mut controller = VirtualTourController::new("3");
        controller.load(api).await;
        controller
    }

    #[tokio::test]
    async fn starts_loading_then_opens_initial_scene() {
        let api = api(Some(site()), Some(tour()));
        let mut controller = VirtualTourController::new("3");
        assert_eq!(controller.state(), &TourState::Loading);

        controller.load(&api).await;

        let view = controller.view().unwrap();
        assert_eq!(view.current_scene_id(), "entrance");
        assert_matches!(view.current_scene(), SceneLookup::Found(scene) if scene.name == "Вход");
        assert_eq!(view.title(), "Ботай - Вход");
    }

    #[tokio::test]
    async fn missing_site_is_an_error() {
        let api = api(None, Some(tour()));
        let controller = ready_controller(&api).await;
        assert_eq!(controller.state(), &TourState::Error(LOCATION_NOT_FOUND.into()));
    }

    #[tokio::test]
    async fn missing_tour_is_an_error() {
        let api = api(Some(site()), None);
        let controller = ready_controller(&api).await;
        assert_eq!(controller.state(), &TourState::Error(PANORAMA_NOT_FOUND.into()));
    }

    #[tokio::test]
    async fn panorama_hotspot_switches_scene_without_fetching() {
        let api = api(Some(site()), Some(tour()));
        let mut controller = ready_controller(&api).await;
        let calls = api.calls.load(Ordering::SeqCst);

        let action = controller.click_hotspot("to-yard");

        assert_eq!(action, HotspotAction::Navigated { to: "yard".into() });
        assert_eq!(controller.view().unwrap().current_scene_id(), "yard");
        assert_eq!(api.calls.load(Ordering::SeqCst), calls);
    }

    #[tokio::test]
    async fn dangling_target_shows_scene_not_found() {
        let api = api(Some(site()), Some(tour()));
        let mut controller = ready_controller(&api).await;

        controller.click_hotspot("to-cellar");

        let view = controller.view().unwrap();
        assert_eq!(view.current_scene(), SceneLookup::NotFound);
        assert!(view.markers().is_empty());
        assert_eq!(controller.click_hotspot("to-yard"), HotspotAction::Ignored);
    }

    #[tokio::test]
    async fn image_hotspot_opens_overlay_and_keeps_scene() {
        let api = api(Some(site()), Some(tour()));
        let mut controller = ready_controller(&api).await;

        let action = controller.click_hotspot("plan");
        assert_eq!(action, HotspotAction::ImageOpened { url: "/img/plan.jpg".into() });

        let view = controller.view().unwrap();
        assert_eq!(view.current_scene_id(), "entrance");
        assert_eq!(view.image_overlay(), Some("/img/plan.jpg"));

        controller.close_image();
        assert_eq!(controller.view().unwrap().image_overlay(), None);
    }

    #[tokio::test]
    async fn markers_use_radians_and_kind_colours() {
        let api = api(Some(site()), Some(tour()));
        let controller = ready_controller(&api).await;

        let markers = controller.view().unwrap().markers();
        assert_eq!(markers.len(), 3);

        assert_eq!(markers[0].latitude, 0.0);
        assert_eq!(markers[0].longitude, 90f64.to_radians());
        assert_eq!(markers[0].color, PANORAMA_HOTSPOT_COLOR);
        assert_eq!(markers[0].tooltip.as_deref(), Some("Во двор"));

        assert_eq!(markers[1].longitude, 0.0, "missing angles default to zero");

        assert_eq!(markers[2].latitude, (-10f64).to_radians());
        assert_eq!(markers[2].color, IMAGE_HOTSPOT_COLOR);
    }

    #[test]
    fn clicks_before_load_are_ignored() {
        let mut controller = VirtualTourController::new("3");
        assert_eq!(controller.click_hotspot("to-yard"), HotspotAction::Ignored);
    }
}
