//! Member profiles: the record the directory and globe render, plus the
//! registration and save flows that keep coordinates in sync with the
//! free-text location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::location::{Coordinate, GeocodeResolver};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub dream: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub bio: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// A profile is complete once it carries a location and a dream.
    pub fn is_complete(&self) -> bool {
        !self.location.trim().is_empty() && !self.dream.trim().is_empty()
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}

/// The profile-save payload. Coordinates are filled in by
/// [`sync_location`], never by the caller directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub dream: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Outcome of a location sync. `Unresolved` is an expected, non-fatal
/// result: the save proceeds without coordinates and the user gets a
/// non-blocking notice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationSync {
    /// Location text did not change; coordinates left as they were.
    Unchanged,
    Updated(Coordinate),
    /// All resolution tiers failed.
    Unresolved,
}

/// Re-resolve coordinates when the stored location text changed.
pub fn sync_location(
    update: &mut ProfileUpdate,
    previous_location: &str,
    resolver: &GeocodeResolver,
) -> LocationSync {
    if update.location.trim().is_empty() || update.location == previous_location {
        return LocationSync::Unchanged;
    }

    match resolver.resolve(&update.location) {
        Some(coord) => {
            update.latitude = Some(coord.lat);
            update.longitude = Some(coord.lon);
            LocationSync::Updated(coord)
        }
        None => {
            log::warn!("no coordinates found for '{}'", update.location);
            LocationSync::Unresolved
        }
    }
}

// ─── Registration ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: String,
    #[serde(default)]
    pub interests: Vec<String>,
    pub dream: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), RegistrationError> {
        for (value, field) in [
            (&self.name, "name"),
            (&self.email, "email"),
            (&self.password, "password"),
            (&self.location, "location"),
            (&self.dream, "dream"),
        ] {
            if value.trim().is_empty() {
                return Err(RegistrationError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Geocode the location once and build the signup metadata. The
    /// account is created even when no coordinates could be determined;
    /// the advisory outcome tells the caller to warn the user.
    pub fn into_metadata(self, resolver: &GeocodeResolver) -> (SignupMetadata, LocationSync) {
        let coords = resolver.resolve(&self.location);
        let sync = match coords {
            Some(coord) => LocationSync::Updated(coord),
            None => LocationSync::Unresolved,
        };

        let metadata = SignupMetadata {
            name: self.name,
            location: self.location,
            interests: self.interests,
            dream: self.dream,
            latitude: coords.map(|c| c.lat),
            longitude: coords.map(|c| c.lon),
        };
        (metadata, sync)
    }
}

/// The metadata attached to the auth collaborator's signup call.
/// Coordinates serialize as explicit nulls when unresolved.
#[derive(Debug, Clone, Serialize)]
pub struct SignupMetadata {
    pub name: String,
    pub location: String,
    pub interests: Vec<String>,
    pub dream: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl SignupMetadata {
    pub fn into_profile(self, email: String) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            name: self.name,
            email,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            interests: self.interests,
            dream: self.dream,
            achievements: Vec::new(),
            bio: String::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_resolver() -> GeocodeResolver {
        let mut resolver = GeocodeResolver::new("no-api-key-required");
        resolver.set_offline(true);
        resolver
    }

    fn sample_update(location: &str) -> ProfileUpdate {
        ProfileUpdate {
            name: "Mira".into(),
            location: location.into(),
            dream: "walk on Mars".into(),
            ..ProfileUpdate::default()
        }
    }

    #[test]
    fn test_completeness() {
        let metadata = SignupMetadata {
            name: "Mira".into(),
            location: "Berlin, Germany".into(),
            interests: vec![],
            dream: "walk on Mars".into(),
            latitude: None,
            longitude: None,
        };
        let mut profile = metadata.into_profile("mira@example.com".into());
        assert!(profile.is_complete());

        profile.dream = String::new();
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_sync_unchanged_location() {
        let mut update = sample_update("Berlin, Germany");
        let sync = sync_location(&mut update, "Berlin, Germany", &offline_resolver());
        assert_eq!(sync, LocationSync::Unchanged);
        assert!(update.latitude.is_none());
    }

    #[test]
    fn test_sync_blank_location() {
        let mut update = sample_update("   ");
        let sync = sync_location(&mut update, "Berlin, Germany", &offline_resolver());
        assert_eq!(sync, LocationSync::Unchanged);
        assert!(update.latitude.is_none());
    }

    #[test]
    fn test_sync_updates_coordinates() {
        let mut update = sample_update("London, UK");
        let sync = sync_location(&mut update, "Berlin, Germany", &offline_resolver());

        match sync {
            LocationSync::Updated(coord) => assert!((coord.lat - 51.5074).abs() < 0.01),
            other => panic!("expected Updated, got {:?}", other),
        }
        assert!((update.latitude.unwrap() - 51.5074).abs() < 0.01);
        assert!((update.longitude.unwrap() + 0.1278).abs() < 0.01);
    }

    #[test]
    fn test_sync_unresolved_leaves_coordinates_empty() {
        let mut update = sample_update("Nowhereland, Atlantis");
        let sync = sync_location(&mut update, "", &offline_resolver());
        assert_eq!(sync, LocationSync::Unresolved);
        assert!(update.latitude.is_none());
        assert!(update.longitude.is_none());
    }

    #[test]
    fn test_registration_validation() {
        let mut form = RegistrationForm {
            name: "Mira".into(),
            email: "mira@example.com".into(),
            password: "orbital-mechanics".into(),
            location: "Tokyo, Japan".into(),
            interests: vec!["Astronomy".into()],
            dream: "see a launch up close".into(),
        };
        assert!(form.validate().is_ok());

        form.password = String::new();
        assert_eq!(
            form.validate(),
            Err(RegistrationError::MissingField("password"))
        );
    }

    #[test]
    fn test_metadata_carries_resolved_coordinates() {
        let form = RegistrationForm {
            name: "Mira".into(),
            email: "mira@example.com".into(),
            password: "orbital-mechanics".into(),
            location: "Tokyo, Japan".into(),
            interests: vec!["Astronomy".into()],
            dream: "see a launch up close".into(),
        };
        let (metadata, sync) = form.into_metadata(&offline_resolver());

        assert!(matches!(sync, LocationSync::Updated(_)));
        assert!((metadata.latitude.unwrap() - 35.6762).abs() < 0.01);
    }

    #[test]
    fn test_metadata_null_coordinates_when_unresolved() {
        let form = RegistrationForm {
            name: "Mira".into(),
            email: "mira@example.com".into(),
            password: "orbital-mechanics".into(),
            location: "Nowhereland, Atlantis".into(),
            interests: vec![],
            dream: "see a launch up close".into(),
        };
        let (metadata, sync) = form.into_metadata(&offline_resolver());

        assert_eq!(sync, LocationSync::Unresolved);
        assert!(metadata.latitude.is_none());

        // The signup payload keeps the null fields visible.
        let json = serde_json::to_value(&metadata).unwrap();
        assert!(json.get("latitude").unwrap().is_null());
    }
}
