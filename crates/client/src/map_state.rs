//! Map page state: viewport, filters, selection and the fetched site list.
//!
//! Era and category filters are applied by the server, so changing them
//! requires a new list fetch. Fetches are identified by a [`FetchTicket`]
//! carrying a monotonically increasing generation; only the result for the
//! most recently issued ticket is applied, so a slow response to an older
//! filter can never overwrite a newer one. Free-text search and the 3D tour
//! flag filter the fetched list locally.

use archmap_core::geo::LatLng;
use archmap_core::search::{highlight_range, name_matches, search_by_name};
use archmap_core::taxonomy::{Category, Era};

use crate::api::{LocationQuery, LocationsApi};
use crate::error::ClientError;
use crate::site::{normalize_sites, Site};

pub const DEFAULT_CENTER: [f64; 2] = [54.87415613441362, 69.14992027973634];
pub const DEFAULT_ZOOM: u8 = 13;

/// Message shown when the server answers the list request with an error.
pub const FETCH_FAILED: &str = "Failed to fetch sites";

/// Map centre (`[lat, lng]`) and zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: [f64; 2],
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Active filters. Only the first era and first category reach the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub era: Vec<Era>,
    pub category: Vec<Category>,
    pub search_query: String,
    pub has_3d_tour: bool,
}

impl Filters {
    pub fn query(&self) -> LocationQuery {
        LocationQuery {
            era: self.era.first().copied(),
            category: self.category.first().copied(),
        }
    }
}

/// Partial filter update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub era: Option<Vec<Era>>,
    pub category: Option<Vec<Category>>,
    pub search_query: Option<String>,
    pub has_3d_tour: Option<bool>,
}

/// Handle for one issued list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub query: LocationQuery,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Map page state. A new controller starts out loading, since the first
/// site list is requested as soon as the page mounts.
#[derive(Debug)]
pub struct MapStateController {
    viewport: Viewport,
    filters: Filters,
    selected: Option<Site>,
    sites: Vec<Site>,
    loading: bool,
    error: Option<String>,
    sidebar_open: bool,
    issued: u64,
}

impl Default for MapStateController {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            filters: Filters::default(),
            selected: None,
            sites: Vec::new(),
            loading: true,
            error: None,
            sidebar_open: false,
            issued: 0,
        }
    }
}

impl MapStateController {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- accessors ----

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn selected_site(&self) -> Option<&Site> {
        self.selected.as_ref()
    }

    /// The full fetched list, before local filtering.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    // ---- filters and fetching ----

    /// Merge a partial update. Returns a ticket when the era or category
    /// selection changed; the caller must fetch for it and hand the result
    /// to [`apply_fetch`](Self::apply_fetch).
    pub fn update_filters(&mut self, update: FilterUpdate) -> Option<FetchTicket> {
        let mut refetch = false;

        if let Some(era) = update.era {
            refetch |= era != self.filters.era;
            self.filters.era = era;
        }
        if let Some(category) = update.category {
            refetch |= category != self.filters.category;
            self.filters.category = category;
        }
        if let Some(query) = update.search_query {
            self.filters.search_query = query;
        }
        if let Some(has_3d_tour) = update.has_3d_tour {
            self.filters.has_3d_tour = has_3d_tour;
        }

        refetch.then(|| self.begin_fetch())
    }

    /// Add `era` to the selection, or remove it if already selected.
    pub fn toggle_era(&mut self, era: Era) -> Option<FetchTicket> {
        let mut selection = self.filters.era.clone();
        toggle(&mut selection, era);
        self.update_filters(FilterUpdate {
            era: Some(selection),
            ..FilterUpdate::default()
        })
    }

    /// Add `category` to the selection, or remove it if already selected.
    pub fn toggle_category(&mut self, category: Category) -> Option<FetchTicket> {
        let mut selection = self.filters.category.clone();
        toggle(&mut selection, category);
        self.update_filters(FilterUpdate {
            category: Some(selection),
            ..FilterUpdate::default()
        })
    }

    /// Issue a ticket for the current filters and enter the loading state.
    /// Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        FetchTicket {
            generation: self.issued,
            query: self.filters.query(),
        }
    }

    /// Apply a list fetch result. Returns `false` (and changes nothing) when
    /// the ticket has been superseded.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<serde_json::Value>, ClientError>,
    ) -> bool {
        if ticket.generation != self.issued {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.issued,
                "Discarding stale site list",
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(raw) => {
                self.sites = normalize_sites(&raw);
                tracing::debug!(
                    received = raw.len(),
                    kept = self.sites.len(),
                    "Applied site list",
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching sites");
                self.error = Some(fetch_error_message(&e));
                self.sites.clear();
            }
        }
        true
    }

    /// Fetch the list for the current filters and apply it.
    pub async fn refresh(&mut self, api: &dyn LocationsApi) -> bool {
        let ticket = self.begin_fetch();
        let result = api.list_locations(&ticket.query).await;
        self.apply_fetch(ticket, result)
    }

    // ---- derived lists ----

    /// Fetched sites matching the search query and the 3D tour flag.
    pub fn filtered_sites(&self) -> Vec<&Site> {
        self.sites
            .iter()
            .filter(|site| name_matches(&site.name, &self.filters.search_query))
            .filter(|site| !self.filters.has_3d_tour || site.has_3d_tour)
            .collect()
    }

    /// Search dropdown entries. Empty for an empty query.
    pub fn search_results(&self) -> Vec<&Site> {
        search_by_name(&self.sites, &self.filters.search_query, |site| &site.name)
    }

    /// Byte range of the query inside `site.name`, for bolding the match
    /// in the search dropdown.
    pub fn search_highlight(&self, site: &Site) -> Option<std::ops::Range<usize>> {
        highlight_range(&site.name, &self.filters.search_query)
    }

    // ---- selection and viewport ----

    pub fn select_site(&mut self, site: Option<Site>) {
        self.selected = site;
    }

    /// Select a fetched site by id. Returns `false` if no such site exists.
    pub fn select_site_by_id(&mut self, id: &str) -> bool {
        match self.sites.iter().find(|site| site.id == id) {
            Some(site) => {
                self.selected = Some(site.clone());
                true
            }
            None => false,
        }
    }

    pub fn move_to_marker(&mut self, coordinates: LatLng) {
        self.viewport.center = coordinates.to_array();
    }

    /// Back to the default centre and zoom, with nothing selected.
    pub fn reset_view(&mut self) {
        self.viewport = Viewport::default();
        self.selected = None;
    }

    /// Flip the sidebar, or force it open/closed.
    pub fn toggle_sidebar(&mut self, forced: Option<bool>) {
        self.sidebar_open = forced.unwrap_or(!self.sidebar_open);
    }

    /// Select a search result, centre the map on it and clear the query.
    pub fn select_search_result(&mut self, id: &str) -> bool {
        if !self.select_site_by_id(id) {
            return false;
        }
        if let Some(coordinates) = self.selected.as_ref().map(|site| site.coordinates) {
            self.move_to_marker(coordinates);
        }
        self.filters.search_query.clear();
        true
    }
}

fn toggle<T: PartialEq>(selection: &mut Vec<T>, value: T) {
    match selection.iter().position(|v| *v == value) {
        Some(index) => {
            selection.remove(index);
        }
        None => selection.push(value),
    }
}

fn fetch_error_message(err: &ClientError) -> String {
    match err {
        ClientError::ApiError { .. } => FETCH_FAILED.to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
