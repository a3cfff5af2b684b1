//! Environment configuration with logged defaults.
//!
//! API keys are never hardcoded; the NASA endpoints fall back to the
//! public DEMO_KEY and the backup key reuses the primary when unset.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_NASA_KEY: &str = "DEMO_KEY";
const DEFAULT_OPENCAGE_KEY: &str = "no-api-key-required";

#[derive(Debug, Clone)]
pub struct Config {
    pub nasa_primary_key: String,
    pub nasa_backup_key: String,
    pub opencage_key: String,
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let primary = load_or("NASA_API_KEY", DEFAULT_NASA_KEY);
        let backup = env::var("NASA_BACKUP_KEY").unwrap_or_else(|_| {
            log::info!("NASA_BACKUP_KEY not set, reusing the primary key");
            primary.clone()
        });

        Self {
            nasa_primary_key: primary,
            nasa_backup_key: backup,
            opencage_key: load_or("OPENCAGE_API_KEY", DEFAULT_OPENCAGE_KEY),
            host: load_or("ASTROHUB_HOST", "127.0.0.1"),
            port: parse_or("ASTROHUB_PORT", 8080),
            data_path: env::var_os("ASTROHUB_DATA")
                .map(PathBuf::from)
                .unwrap_or_else(crate::store::default_path),
        }
    }
}

fn load_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        log::info!("{} not set, using default", key);
        default.to_string()
    })
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            log::warn!("invalid {} value '{}': {}", key, raw, e);
            default
        }),
        Err(_) => default,
    }
}
