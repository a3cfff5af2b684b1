//! NASA open-data client.
//!
//! Every request goes through the dual-key failover: the primary key is
//! tried once, then the backup key once on a non-success status.

use chrono::NaiveDate;
use thiserror::Error;

use super::fetch::{fetch_with_key_failover, send_http};
use super::models::{Apod, MarsPhotos, NeoFeed};

const APOD_URL: &str = "https://api.nasa.gov/planetary/apod";
const NEO_FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";
const MARS_PHOTOS_URL: &str = "https://api.nasa.gov/mars-photos/api/v1/rovers";

#[derive(Debug, Error)]
pub enum NasaError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    InvalidResponse(String),
}

impl From<ureq::Error> for NasaError {
    fn from(err: ureq::Error) -> Self {
        NasaError::Transport(err.to_string())
    }
}

pub struct NasaClient {
    primary_key: String,
    backup_key: String,
}

impl NasaClient {
    pub fn new(primary_key: impl Into<String>, backup_key: impl Into<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            backup_key: backup_key.into(),
        }
    }

    /// Astronomy Picture of the Day; `None` means today's picture.
    pub fn apod(&self, date: Option<NaiveDate>) -> Result<Apod, NasaError> {
        self.fetch_json(|key| apod_url(key, date))
    }

    /// Near-Earth objects approaching from `start_date` onward.
    pub fn neo_feed(&self, start_date: NaiveDate) -> Result<NeoFeed, NasaError> {
        self.fetch_json(|key| neo_feed_url(key, start_date))
    }

    pub fn mars_photos(&self, rover: &str, sol: u32) -> Result<MarsPhotos, NasaError> {
        self.fetch_json(|key| mars_photos_url(key, rover, sol))
    }

    fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        build_url: impl Fn(&str) -> String,
    ) -> Result<T, NasaError> {
        let response =
            fetch_with_key_failover(send_http, build_url, &self.primary_key, &self.backup_key)?;

        if response.status() >= 400 {
            return Err(NasaError::Status(response.status()));
        }

        response
            .into_json()
            .map_err(|e| NasaError::InvalidResponse(e.to_string()))
    }
}

fn apod_url(key: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!("{}?api_key={}&date={}", APOD_URL, key, d),
        None => format!("{}?api_key={}", APOD_URL, key),
    }
}

fn neo_feed_url(key: &str, start_date: NaiveDate) -> String {
    format!("{}?start_date={}&api_key={}", NEO_FEED_URL, start_date, key)
}

fn mars_photos_url(key: &str, rover: &str, sol: u32) -> String {
    format!("{}/{}/photos?sol={}&api_key={}", MARS_PHOTOS_URL, rover, sol, key)
}
