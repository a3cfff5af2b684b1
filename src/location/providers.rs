//! Live geocoding tiers: Nominatim (primary) and OpenCage (secondary).
//!
//! Each provider issues exactly one request per lookup and asks for at
//! most one result. No retries, no timeouts beyond the transport
//! defaults.

use serde::Deserialize;

use super::types::{Coordinate, GeocodeError};

const USER_AGENT: &str = "AstroHub/0.4 (community-globe)";

/// A live geocoding service — one request per lookup, first result only.
pub trait LiveGeocoder: Send + Sync {
    fn name(&self) -> &'static str;
    fn lookup(&self, query: &str) -> Result<Coordinate, GeocodeError>;
}

// ─── Nominatim (OpenStreetMap) ──────────────────────────────────

pub struct Nominatim;

#[derive(Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

impl LiveGeocoder for Nominatim {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    fn lookup(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let url = format!(
            "https://nominatim.openstreetmap.org/search?format=json&q={}&limit=1&addressdetails=1",
            urlencode(query),
        );

        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(fold_transport)?;

        let body = response
            .into_string()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;
        parse_nominatim(&body, query)
    }
}

fn parse_nominatim(body: &str, query: &str) -> Result<Coordinate, GeocodeError> {
    let results: Vec<NominatimResult> =
        serde_json::from_str(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    let first = results
        .first()
        .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))?;

    // Nominatim sends coordinates as strings.
    let lat: f64 = first
        .lat
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("latitude '{}'", first.lat)))?;
    let lon: f64 = first
        .lon
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("longitude '{}'", first.lon)))?;

    bounded(Coordinate::new(lat, lon))
}

// ─── OpenCage ───────────────────────────────────────────────────

pub struct OpenCage {
    api_key: String,
}

impl OpenCage {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[derive(Deserialize)]
struct OpenCageBody {
    #[serde(default)]
    results: Vec<OpenCageResult>,
}

#[derive(Deserialize)]
struct OpenCageResult {
    geometry: OpenCageGeometry,
}

#[derive(Deserialize)]
struct OpenCageGeometry {
    lat: f64,
    lng: f64,
}

impl LiveGeocoder for OpenCage {
    fn name(&self) -> &'static str {
        "opencage"
    }

    fn lookup(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let url = format!(
            "https://api.opencagedata.com/geocode/v1/json?q={}&key={}&limit=1&no_annotations=1",
            urlencode(query),
            urlencode(&self.api_key),
        );

        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(fold_transport)?;

        let body = response
            .into_string()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;
        parse_opencage(&body, query)
    }
}

fn parse_opencage(body: &str, query: &str) -> Result<Coordinate, GeocodeError> {
    let parsed: OpenCageBody =
        serde_json::from_str(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    let first = parsed
        .results
        .first()
        .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))?;

    bounded(Coordinate::new(first.geometry.lat, first.geometry.lng))
}

// ─── Helpers ────────────────────────────────────────────────────

fn bounded(coord: Coordinate) -> Result<Coordinate, GeocodeError> {
    if coord.in_bounds() {
        Ok(coord)
    } else {
        Err(GeocodeError::InvalidResponse(format!(
            "coordinates out of range: {}, {}",
            coord.lat, coord.lon
        )))
    }
}

fn fold_transport(err: ureq::Error) -> GeocodeError {
    match err {
        ureq::Error::Status(code, _) => GeocodeError::Status(code),
        other => GeocodeError::Network(other.to_string()),
    }
}

// ─── URL encoding (minimal) ─────────────────────────────────────

fn urlencode(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '&' => "%26".to_string(),
            '=' => "%3D".to_string(),
            '+' => "%2B".to_string(),
            ',' => "%2C".to_string(),
            _ if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '~' => {
                c.to_string()
            }
            _ => format!("%{:02X}", c as u32),
        })
        .collect()
}
