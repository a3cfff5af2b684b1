//! NASA open-data access: the dual-key failover fetch, typed payload
//! models, and the client behind the APOD / near-Earth-object / Mars
//! rover panels.

pub mod client;
pub mod fetch;
pub mod models;

pub use client::{NasaClient, NasaError};
pub use fetch::fetch_with_key_failover;
