mod handlers;
mod state;

use axum::routing::{get, put};
use axum::Router;
use state::AppState;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::location::GeocodeResolver;
use crate::nasa::NasaClient;
use crate::store::ProfileStore;

pub fn build_router(config: &Config, offline: bool) -> Router {
    let mut resolver = GeocodeResolver::new(&config.opencage_key);
    resolver.set_offline(offline);

    let state = Arc::new(AppState {
        resolver,
        store: Mutex::new(ProfileStore::load_from(config.data_path.clone())),
        nasa: NasaClient::new(
            config.nasa_primary_key.as_str(),
            config.nasa_backup_key.as_str(),
        ),
    });

    Router::new()
        .route("/api/resolve", get(handlers::resolve))
        .route(
            "/api/profiles",
            get(handlers::list_profiles).post(handlers::register),
        )
        .route("/api/profiles/{id}", put(handlers::update_profile))
        .route("/api/globe", get(handlers::globe))
        .route("/api/interests", get(handlers::interests))
        .route("/api/nasa/apod", get(handlers::apod))
        .route("/api/nasa/neo", get(handlers::neo_feed))
        .route("/api/nasa/mars", get(handlers::mars_photos))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(config: Config, offline: bool) {
    let app = build_router(&config, offline);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  AstroHub server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    });
}
