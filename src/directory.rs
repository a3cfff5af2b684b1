//! Community directory: search filters over member profiles and the
//! point set the globe view renders.

use serde::Serialize;
use uuid::Uuid;

use crate::profile::Profile;

/// The interest tags offered by registration and the discover filters.
pub const SPACE_INTERESTS: [&str; 8] = [
    "Space Medicine",
    "Rocketry",
    "Astronomy",
    "Astrophysics",
    "Planetary Science",
    "Space Engineering",
    "Astrobiology",
    "Satellite Technology",
];

const POINT_SIZE: f64 = 0.2;
const VIEWER_POINT_SIZE: f64 = 0.3;
const POINT_COLOR: &str = "#8b5cf6";
const VIEWER_POINT_COLOR: &str = "#ff6b35";

/// Directory search criteria. `interest: None` means "all".
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub term: String,
    pub interest: Option<String>,
}

impl SearchFilter {
    /// The term matches against name, location, or dream,
    /// case-insensitively; the interest filter requires membership.
    pub fn matches(&self, profile: &Profile) -> bool {
        let term = self.term.to_lowercase();
        let matches_term = term.is_empty()
            || profile.name.to_lowercase().contains(&term)
            || profile.location.to_lowercase().contains(&term)
            || profile.dream.to_lowercase().contains(&term);

        let matches_interest = match &self.interest {
            Some(interest) => profile.interests.iter().any(|i| i == interest),
            None => true,
        };

        matches_term && matches_interest
    }
}

/// Filter a profile list, preserving its order.
pub fn filter_profiles<'a>(profiles: &'a [Profile], filter: &SearchFilter) -> Vec<&'a Profile> {
    profiles.iter().filter(|p| filter.matches(p)).collect()
}

/// One render-ready marker on the community globe.
#[derive(Debug, Clone, Serialize)]
pub struct GlobePoint {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub dream: String,
    /// Top interests only, for the marker tooltip.
    pub interests: Vec<String>,
    pub lat: f64,
    pub lng: f64,
    pub size: f64,
    pub color: &'static str,
}

/// Profiles without coordinates are left off the globe. The viewer's
/// own marker is drawn larger and in the highlight color.
pub fn globe_points(profiles: &[Profile], viewer: Option<Uuid>) -> Vec<GlobePoint> {
    profiles
        .iter()
        .filter_map(|profile| {
            let coord = profile.coordinate()?;
            let is_viewer = viewer == Some(profile.id);
            Some(GlobePoint {
                id: profile.id,
                name: profile.name.clone(),
                location: profile.location.clone(),
                dream: profile.dream.clone(),
                interests: profile.interests.iter().take(3).cloned().collect(),
                lat: coord.lat,
                lng: coord.lon,
                size: if is_viewer { VIEWER_POINT_SIZE } else { POINT_SIZE },
                color: if is_viewer { VIEWER_POINT_COLOR } else { POINT_COLOR },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn member(name: &str, location: &str, dream: &str, interests: &[&str]) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            location: location.into(),
            latitude: Some(0.0),
            longitude: Some(0.0),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            dream: dream.into(),
            achievements: vec![],
            bio: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_term_matches_name_location_and_dream() {
        let profiles = vec![
            member("Amara", "Lagos, Nigeria", "build a lunar habitat", &[]),
            member("Jonas", "Oslo, Norway", "photograph the aurora", &[]),
        ];

        let by_name = SearchFilter { term: "amara".into(), interest: None };
        assert_eq!(filter_profiles(&profiles, &by_name).len(), 1);

        let by_location = SearchFilter { term: "oslo".into(), interest: None };
        assert_eq!(filter_profiles(&profiles, &by_location)[0].name, "Jonas");

        let by_dream = SearchFilter { term: "lunar".into(), interest: None };
        assert_eq!(filter_profiles(&profiles, &by_dream)[0].name, "Amara");
    }

    #[test]
    fn test_interest_filter() {
        let profiles = vec![
            member("Amara", "Lagos", "fly", &["Rocketry", "Astronomy"]),
            member("Jonas", "Oslo", "observe", &["Astronomy"]),
        ];

        let filter = SearchFilter { term: String::new(), interest: Some("Rocketry".into()) };
        let hits = filter_profiles(&profiles, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Amara");

        // No interest filter means everyone.
        let all = SearchFilter::default();
        assert_eq!(filter_profiles(&profiles, &all).len(), 2);
    }

    #[test]
    fn test_term_and_interest_combine() {
        let profiles = vec![
            member("Amara", "Lagos", "fly", &["Rocketry"]),
            member("Amina", "Cairo", "fly", &["Astronomy"]),
        ];

        let filter = SearchFilter { term: "fly".into(), interest: Some("Astronomy".into()) };
        let hits = filter_profiles(&profiles, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Amina");
    }

    #[test]
    fn test_globe_skips_profiles_without_coordinates() {
        let mut unplaced = member("Jonas", "somewhere", "observe", &[]);
        unplaced.latitude = None;
        unplaced.longitude = None;
        let profiles = vec![member("Amara", "Lagos", "fly", &[]), unplaced];

        let points = globe_points(&profiles, None);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name, "Amara");
    }

    #[test]
    fn test_globe_highlights_viewer() {
        let amara = member("Amara", "Lagos", "fly", &[]);
        let jonas = member("Jonas", "Oslo", "observe", &[]);
        let viewer_id = jonas.id;

        let points = globe_points(&[amara, jonas], Some(viewer_id));
        let viewer_point = points.iter().find(|p| p.id == viewer_id).unwrap();
        let other_point = points.iter().find(|p| p.id != viewer_id).unwrap();

        assert_eq!(viewer_point.color, VIEWER_POINT_COLOR);
        assert!(viewer_point.size > other_point.size);
        assert_eq!(other_point.color, POINT_COLOR);
    }

    #[test]
    fn test_globe_tooltip_interests_are_capped() {
        let profile = member(
            "Amara",
            "Lagos",
            "fly",
            &["Rocketry", "Astronomy", "Astrobiology", "Space Medicine"],
        );
        let points = globe_points(&[profile], None);
        assert_eq!(points[0].interests.len(), 3);
    }
}
