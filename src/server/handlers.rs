use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::directory::{self, GlobePoint, SearchFilter, SPACE_INTERESTS};
use crate::nasa::models::{Apod, MarsPhotos, NeoFeed};
use crate::nasa::NasaError;
use crate::profile::{sync_location, LocationSync, Profile, ProfileUpdate, RegistrationForm};

use super::state::AppState;

const DEFAULT_MARS_ROVER: &str = "curiosity";
const DEFAULT_MARS_SOL: u32 = 1000;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

impl From<NasaError> for ApiError {
    fn from(err: NasaError) -> Self {
        ApiError(StatusCode::BAD_GATEWAY, err.to_string())
    }
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub query: Option<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub query: String,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Unresolved is a normal 200 outcome here — the UI shows a
/// non-blocking notice, not an error.
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let start = Instant::now();

    let query = params.query.as_deref().unwrap_or("").trim().to_string();
    if query.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'query' parameter"));
    }

    let coord = state.resolver.resolve(&query);

    log::info!(
        "GET /api/resolve query={} resolved={} ({:.1}ms)",
        query,
        coord.is_some(),
        start.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Json(ResolveResponse {
        resolved: coord.is_some(),
        latitude: coord.map(|c| c.lat),
        longitude: coord.map(|c| c.lon),
        query,
    }))
}

// ─── GET /api/profiles ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct DirectoryQuery {
    pub search: Option<String>,
    pub interest: Option<String>,
}

pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DirectoryQuery>,
) -> Json<Vec<Profile>> {
    let filter = SearchFilter {
        term: params.search.unwrap_or_default(),
        interest: params.interest.filter(|i| i != "all" && !i.is_empty()),
    };

    let all = state.store.lock().unwrap().all();
    let filtered: Vec<Profile> = directory::filter_profiles(&all, &filter)
        .into_iter()
        .cloned()
        .collect();
    Json(filtered)
}

// ─── POST /api/profiles ──────────────────────────────────────────

#[derive(Serialize)]
pub struct RegisterResponse {
    pub profile: Profile,
    /// True when no coordinates could be determined for the location.
    pub location_warning: bool,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    form.validate()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let email = form.email.clone();
    let (metadata, sync) = form.into_metadata(&state.resolver);
    let profile = metadata.into_profile(email);
    state.store.lock().unwrap().upsert(profile.clone());

    log::info!(
        "POST /api/profiles name={} location={} resolved={}",
        profile.name,
        profile.location,
        profile.latitude.is_some(),
    );

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            profile,
            location_warning: matches!(sync, LocationSync::Unresolved),
        }),
    ))
}

// ─── PUT /api/profiles/{id} ──────────────────────────────────────

#[derive(Serialize)]
pub struct UpdateResponse {
    pub profile: Profile,
    pub location_warning: bool,
    /// Location and dream are both filled in; unlocks the member area.
    pub profile_complete: bool,
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(mut update): Json<ProfileUpdate>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let previous_location = state
        .store
        .lock()
        .unwrap()
        .get(id)
        .map(|p| p.location.clone())
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("No profile with id {}", id)))?;

    // Resolution happens outside the store lock; it may hit the network.
    let sync = sync_location(&mut update, &previous_location, &state.resolver);

    let profile = state
        .store
        .lock()
        .unwrap()
        .apply_update(id, update)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("No profile with id {}", id)))?;

    Ok(Json(UpdateResponse {
        profile_complete: profile.is_complete(),
        profile,
        location_warning: matches!(sync, LocationSync::Unresolved),
    }))
}

// ─── GET /api/globe ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GlobeQuery {
    pub viewer: Option<Uuid>,
}

pub async fn globe(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GlobeQuery>,
) -> Json<Vec<GlobePoint>> {
    let profiles = state.store.lock().unwrap().all();
    Json(directory::globe_points(&profiles, params.viewer))
}

// ─── GET /api/interests ──────────────────────────────────────────

pub async fn interests() -> Json<Vec<&'static str>> {
    Json(SPACE_INTERESTS.to_vec())
}

// ─── GET /api/nasa/* ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ApodQuery {
    pub date: Option<String>,
}

pub async fn apod(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ApodQuery>,
) -> Result<Json<Apod>, ApiError> {
    let date = match params.date.as_deref() {
        Some(d) if !d.is_empty() => Some(NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(
            |e| api_error(StatusCode::BAD_REQUEST, format!("Invalid date '{}': {}", d, e)),
        )?),
        _ => None,
    };

    Ok(Json(state.nasa.apod(date)?))
}

pub async fn neo_feed(State(state): State<Arc<AppState>>) -> Result<Json<NeoFeed>, ApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(state.nasa.neo_feed(today)?))
}

#[derive(Deserialize)]
pub struct MarsQuery {
    pub sol: Option<u32>,
}

pub async fn mars_photos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MarsQuery>,
) -> Result<Json<MarsPhotos>, ApiError> {
    let sol = params.sol.unwrap_or(DEFAULT_MARS_SOL);
    Ok(Json(state.nasa.mars_photos(DEFAULT_MARS_ROVER, sol)?))
}
