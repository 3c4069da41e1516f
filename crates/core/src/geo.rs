//! Geographic coordinate validation.
//!
//! A site is renderable only when its coordinates form a finite pair inside
//! the standard latitude/longitude ranges. Everything outside that is
//! treated as "unrenderable" by callers, never as a hard error.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A validated `(latitude, longitude)` pair in degrees.
///
/// Serializes as a two-element `[lat, lng]` array, which is the shape the
/// map front-end consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Build a coordinate pair, returning `None` when it is not renderable.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        is_renderable(lat, lng).then_some(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(value: LatLng) -> Self {
        value.to_array()
    }
}

impl TryFrom<[f64; 2]> for LatLng {
    type Error = CoreError;

    fn try_from([lat, lng]: [f64; 2]) -> Result<Self, Self::Error> {
        validate_coordinates(lat, lng).map_err(CoreError::Validation)?;
        Ok(Self { lat, lng })
    }
}

/// Whether a latitude lies in `[-90, 90]` and is finite.
pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (MIN_LATITUDE..=MAX_LATITUDE).contains(&lat)
}

/// Whether a longitude lies in `[-180, 180]` and is finite.
pub fn is_valid_longitude(lng: f64) -> bool {
    lng.is_finite() && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lng)
}

/// Whether a coordinate pair can be placed on the map.
pub fn is_renderable(lat: f64, lng: f64) -> bool {
    is_valid_latitude(lat) && is_valid_longitude(lng)
}

/// Validate a coordinate pair, describing the first offending component.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), String> {
    if !is_valid_latitude(lat) {
        return Err(format!(
            "Latitude {lat} is outside the allowed range [{MIN_LATITUDE}, {MAX_LATITUDE}]"
        ));
    }
    if !is_valid_longitude(lng) {
        return Err(format!(
            "Longitude {lng} is outside the allowed range [{MIN_LONGITUDE}, {MAX_LONGITUDE}]"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_boundaries() {
        assert!(is_renderable(90.0, 180.0));
        assert!(is_renderable(-90.0, -180.0));
        assert!(is_renderable(0.0, 0.0));
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert!(!is_renderable(91.0, 0.0));
        assert!(!is_renderable(-90.5, 0.0));
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert!(!is_renderable(0.0, 180.01));
        assert!(!is_renderable(0.0, -181.0));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(!is_renderable(f64::NAN, 0.0));
        assert!(!is_renderable(0.0, f64::INFINITY));
    }

    #[test]
    fn validate_reports_latitude_first() {
        let err = validate_coordinates(100.0, 500.0).unwrap_err();
        assert!(err.starts_with("Latitude 100"), "got: {err}");
    }

    #[test]
    fn latlng_serializes_as_pair() {
        let point = LatLng::new(51.5, -0.09).unwrap();
        assert_eq!(serde_json::to_value(point).unwrap(), serde_json::json!([51.5, -0.09]));
    }

    #[test]
    fn try_from_array_reports_validation_error() {
        assert_matches::assert_matches!(
            LatLng::try_from([91.0, 0.0]),
            Err(CoreError::Validation(msg)) if msg.contains("Latitude")
        );
        assert_eq!(
            LatLng::try_from([51.5, -0.09]).map(LatLng::to_array).ok(),
            Some([51.5, -0.09])
        );
    }

    #[test]
    fn latlng_deserialize_rejects_out_of_range() {
        let parsed: Result<LatLng, _> = serde_json::from_str("[91, 0]");
        assert!(parsed.is_err());
    }
}
