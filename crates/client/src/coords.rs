//! Defensive parsing of site coordinates received from the server.
//!
//! The list endpoint is expected to send `[lat, lng]`, but older records
//! carry `{ "lat": .., "lng": .. }` objects or JSON-encoded strings of
//! either. Each shape gets one explicit parse attempt; anything that does
//! not yield a renderable pair is rejected as a whole.

use archmap_core::geo::LatLng;
use serde_json::Value;

/// The accepted input shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawCoordinates<'a> {
    Object { lat: &'a Value, lng: &'a Value },
    Pair(&'a Value, &'a Value),
    Encoded(&'a str),
}

impl<'a> RawCoordinates<'a> {
    /// Classify a JSON value. `None` for shapes that are never coordinates.
    pub fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) => match (map.get("lat"), map.get("lng")) {
                (Some(lat), Some(lng)) => Some(Self::Object { lat, lng }),
                _ => None,
            },
            Value::Array(items) if items.len() == 2 => Some(Self::Pair(&items[0], &items[1])),
            Value::String(text) => Some(Self::Encoded(text)),
            _ => None,
        }
    }
}

/// Parse coordinates in any accepted shape.
pub fn parse_coordinates(value: &Value) -> Option<LatLng> {
    match RawCoordinates::classify(value)? {
        RawCoordinates::Object { lat, lng } | RawCoordinates::Pair(lat, lng) => {
            LatLng::new(to_number(lat)?, to_number(lng)?)
        }
        RawCoordinates::Encoded(text) => {
            let decoded: Value = serde_json::from_str(text).ok()?;
            // One level of decoding only; a string inside a string is rejected.
            match RawCoordinates::classify(&decoded)? {
                RawCoordinates::Object { lat, lng } | RawCoordinates::Pair(lat, lng) => {
                    LatLng::new(to_number(lat)?, to_number(lng)?)
                }
                RawCoordinates::Encoded(_) => None,
            }
        }
    }
}

/// Numbers pass through; numeric strings are parsed after trimming.
fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse().ok()
            }
        }
        _ => None,
    }
}
