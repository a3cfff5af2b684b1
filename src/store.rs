//! File-backed profile store at ~/.astrohub/profiles.json.
//!
//! Stands in for the hosted row store in tests, the CLI, and the
//! bundled server. Pretty JSON keyed by profile id; persistence
//! failures are logged, never fatal.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::profile::{Profile, ProfileUpdate};

pub struct ProfileStore {
    path: PathBuf,
    profiles: HashMap<Uuid, Profile>,
}

impl ProfileStore {
    /// Load from the default location (~/.astrohub/profiles.json).
    pub fn load() -> Self {
        Self::load_from(default_path())
    }

    /// Load from a specific path (for testing).
    pub fn load_from(path: PathBuf) -> Self {
        let profiles = Self::read_file(&path).unwrap_or_default();
        Self { path, profiles }
    }

    fn read_file(path: &PathBuf) -> Option<HashMap<Uuid, Profile>> {
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }

    pub fn get(&self, id: Uuid) -> Option<&Profile> {
        self.profiles.get(&id)
    }

    /// Insert or replace a profile and persist to disk.
    pub fn upsert(&mut self, profile: Profile) {
        self.profiles.insert(profile.id, profile);
        self.persist();
    }

    /// Apply a save payload to an existing profile. Coordinates are
    /// only overwritten when the payload carries them, so a save that
    /// did not re-resolve the location keeps the old globe position.
    pub fn apply_update(&mut self, id: Uuid, update: ProfileUpdate) -> Option<Profile> {
        let profile = self.profiles.get_mut(&id)?;
        profile.name = update.name;
        profile.location = update.location;
        profile.dream = update.dream;
        profile.interests = update.interests;
        profile.achievements = update.achievements;
        profile.bio = update.bio;
        if update.latitude.is_some() {
            profile.latitude = update.latitude;
        }
        if update.longitude.is_some() {
            profile.longitude = update.longitude;
        }
        let updated = profile.clone();
        self.persist();
        Some(updated)
    }

    /// All profiles, newest first — the directory's ordering.
    pub fn all(&self) -> Vec<Profile> {
        let mut profiles: Vec<Profile> = self.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&self.profiles) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("could not persist profile store: {}", e);
                }
            }
            Err(e) => log::warn!("could not serialize profile store: {}", e),
        }
    }
}

pub(crate) fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".astrohub")
        .join("profiles.json")
}
