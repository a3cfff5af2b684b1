//! Typed views over the NASA open-data payloads the panels render.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─── Astronomy Picture of the Day ───────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    pub date: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    pub media_type: MediaType,
    #[serde(default)]
    pub service_version: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

// ─── Near-Earth object feed ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoFeed {
    pub element_count: u64,
    /// Objects grouped by close-approach date (YYYY-MM-DD).
    pub near_earth_objects: BTreeMap<String, Vec<NearEarthObject>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearEarthObject {
    pub id: String,
    pub name: String,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: DiameterRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseApproach {
    pub close_approach_date: String,
    pub miss_distance: MissDistance,
    pub relative_velocity: RelativeVelocity,
}

/// The feed sends these as decimal strings, not numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissDistance {
    pub kilometers: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_hour: String,
}

// ─── Mars rover photos ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarsPhotos {
    pub photos: Vec<MarsPhoto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarsPhoto {
    pub id: u64,
    pub img_src: String,
    pub earth_date: String,
    pub camera: MarsCamera,
    pub rover: MarsRover,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarsCamera {
    pub name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarsRover {
    pub name: String,
    pub status: String,
}
