//! AstroHub — service core of a community platform for space
//! enthusiasts.
//!
//! Owns the location-resolution fallback chain that places members on
//! the community globe, the NASA dual-key fetch failover behind the
//! open-data panels, the member directory model, a file-backed profile
//! store, and the HTTP API. Authentication and hosted row storage stay
//! with external collaborators.

pub mod config;
pub mod directory;
pub mod location;
pub mod nasa;
pub mod profile;
pub mod server;
pub mod store;
