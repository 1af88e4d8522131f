//! # API REST
//!
//! REST API implementation for ERA.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, request validation)
//!
//! Uses `api-shared` for request/response types and `era-core` for matching.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    DispatchReq, DispatchRes, HealthRes, HealthService, HospitalRes, ListDispatchesRes,
    ListSymptomsRes, NearbyHospitalsReq, NearbyHospitalsRes, RankHospitalsReq, RankHospitalsRes,
    RankedHospitalRes, SymptomRes,
};
use era_core::{
    config::{
        ambulance_speed_from_env_value, default_location_from_env_values,
        rank_limit_from_env_value, resolve_taxonomy, validate_catalog_file,
    },
    dispatch, dispatch_message, facility_source_for, Coordinates, CoreConfig, DispatchRecord,
    EraError, EraResult, Facility, FacilitySource, HospitalMatcher, MatchOutcome,
    RecordingDispatchNotifier, Symptom, SymptomDefinition, SymptomSelection,
    TracingDispatchNotifier,
};

type ApiError = (StatusCode, &'static str);

/// Application state for the REST API server
///
/// Shared by all request handlers. The matcher and its taxonomy are immutable; the dispatch log
/// is the only mutable state and guards itself.
#[derive(Clone)]
pub struct AppState {
    matcher: Arc<HospitalMatcher>,
    source: Arc<dyn FacilitySource>,
    dispatch_log: Arc<RecordingDispatchNotifier>,
}

impl AppState {
    /// Build state from configuration, choosing the facility source it names.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog file cannot be loaded.
    pub fn new(cfg: Arc<CoreConfig>) -> EraResult<Self> {
        let source: Arc<dyn FacilitySource> = Arc::from(facility_source_for(&cfg)?);
        Ok(Self::with_source(cfg, source))
    }

    /// Build state around an explicit facility source.
    pub fn with_source(cfg: Arc<CoreConfig>, source: Arc<dyn FacilitySource>) -> Self {
        Self {
            matcher: Arc::new(HospitalMatcher::new(cfg)),
            source,
            dispatch_log: Arc::new(RecordingDispatchNotifier::new()),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_symptoms,
        nearby_hospitals,
        rank_hospitals,
        dispatch_ambulance,
        list_dispatches,
    ),
    components(schemas(
        HealthRes,
        SymptomRes,
        ListSymptomsRes,
        HospitalRes,
        NearbyHospitalsReq,
        NearbyHospitalsRes,
        RankHospitalsReq,
        RankedHospitalRes,
        RankHospitalsRes,
        DispatchReq,
        DispatchRes,
        ListDispatchesRes,
    ))
)]
struct ApiDoc;

/// Resolve core configuration from environment variables.
///
/// Call once at startup; handlers never read the environment.
///
/// # Environment Variables
/// - `ERA_RANK_LIMIT`: default number of ranked hospitals (default: 3)
/// - `ERA_TAXONOMY_FILE`: symptom taxonomy file (default: built-in table)
/// - `ERA_CATALOG_FILE`: fixed facility catalog (default: generate nearby hospitals)
/// - `ERA_DEFAULT_LATITUDE` / `ERA_DEFAULT_LONGITUDE`: fallback caller location
/// - `ERA_AMBULANCE_SPEED_KMH`: speed used for arrival estimates (default: 40)
///
/// # Errors
/// Returns an error if any value is malformed or a referenced file cannot be loaded.
pub fn load_config_from_env() -> anyhow::Result<CoreConfig> {
    let rank_limit = rank_limit_from_env_value(std::env::var("ERA_RANK_LIMIT").ok())?;
    let taxonomy = resolve_taxonomy(std::env::var("ERA_TAXONOMY_FILE").ok().map(PathBuf::from))?;
    let catalog_file =
        validate_catalog_file(std::env::var("ERA_CATALOG_FILE").ok().map(PathBuf::from))?;
    let default_location = default_location_from_env_values(
        std::env::var("ERA_DEFAULT_LATITUDE").ok(),
        std::env::var("ERA_DEFAULT_LONGITUDE").ok(),
    )?;
    let ambulance_speed =
        ambulance_speed_from_env_value(std::env::var("ERA_AMBULANCE_SPEED_KMH").ok())?;

    Ok(CoreConfig::new(
        rank_limit,
        Arc::new(taxonomy),
        default_location,
        ambulance_speed,
        catalog_file,
    )?)
}

/// REST listen address from `ERA_REST_ADDR`.
pub fn rest_addr_from_env() -> String {
    std::env::var("ERA_REST_ADDR").unwrap_or_else(|_| era_core::DEFAULT_REST_ADDR.into())
}

/// Build the REST router with Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/symptoms", get(list_symptoms))
        .route("/hospitals/nearby", post(nearby_hospitals))
        .route("/hospitals/rank", post(rank_hospitals))
        .route("/dispatch", post(dispatch_ambulance))
        .route("/dispatches", get(list_dispatches))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/symptoms",
    responses(
        (status = 200, description = "Selectable symptoms in display order", body = ListSymptomsRes)
    )
)]
/// List the symptoms the configured taxonomy knows about
#[axum::debug_handler]
async fn list_symptoms(State(state): State<AppState>) -> Json<ListSymptomsRes> {
    let symptoms = state
        .matcher
        .taxonomy()
        .definitions()
        .iter()
        .map(symptom_res)
        .collect();
    Json(ListSymptomsRes { symptoms })
}

#[utoipa::path(
    post,
    path = "/hospitals/nearby",
    request_body = NearbyHospitalsReq,
    responses(
        (status = 200, description = "Hospitals near the location, nearest first", body = NearbyHospitalsRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Find hospitals near a location
///
/// # Errors
/// Returns `400 Bad Request` if the coordinates are out of range and
/// `500 Internal Server Error` if the facility source fails.
#[axum::debug_handler]
async fn nearby_hospitals(
    State(state): State<AppState>,
    Json(req): Json<NearbyHospitalsReq>,
) -> Result<Json<NearbyHospitalsRes>, ApiError> {
    let origin = match Coordinates::new(req.latitude, req.longitude) {
        Ok(origin) => origin,
        Err(e) => {
            tracing::warn!("Invalid coordinates: {}", e);
            return Err((StatusCode::BAD_REQUEST, "Invalid coordinates"));
        }
    };

    match state.source.facilities(Some(origin)) {
        Ok(facilities) => Ok(Json(NearbyHospitalsRes {
            hospitals: facilities.iter().map(hospital_res).collect(),
        })),
        Err(e) => Err(error_response("Nearby hospitals", &e)),
    }
}

#[utoipa::path(
    post,
    path = "/hospitals/rank",
    request_body = RankHospitalsReq,
    responses(
        (status = 200, description = "Hospitals ranked by symptom match, then distance", body = RankHospitalsRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Rank hospitals for the reported symptoms
///
/// With no symptoms the response sets `no_symptoms` and returns no hospitals, so clients can
/// prompt for symptoms instead of showing a meaningless list.
///
/// # Errors
/// Returns `400 Bad Request` if a symptom id is malformed, only one coordinate is given, the
/// coordinates are out of range, or `limit` is not positive.
#[axum::debug_handler]
async fn rank_hospitals(
    State(state): State<AppState>,
    Json(req): Json<RankHospitalsReq>,
) -> Result<Json<RankHospitalsRes>, ApiError> {
    let symptoms = parse_symptoms(req.symptoms)?;
    let origin = parse_origin(req.latitude, req.longitude)?;
    let facilities = load_facilities(&state, origin)?;

    let unknown_symptoms = state
        .matcher
        .unknown_symptoms(&symptoms)
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    match state
        .matcher
        .recommend(&facilities, &symptoms, parse_limit(req.limit))
    {
        Ok(MatchOutcome::NoSymptoms) => Ok(Json(RankHospitalsRes {
            no_symptoms: true,
            unknown_symptoms,
            hospitals: Vec::new(),
        })),
        Ok(MatchOutcome::Ranked(ranked)) => Ok(Json(RankHospitalsRes {
            no_symptoms: false,
            unknown_symptoms,
            hospitals: ranked
                .iter()
                .map(|s| RankedHospitalRes {
                    hospital: hospital_res(&s.facility),
                    match_score: s.match_score,
                })
                .collect(),
        })),
        Err(e) => Err(error_response("Rank hospitals", &e)),
    }
}

#[utoipa::path(
    post,
    path = "/dispatch",
    request_body = DispatchReq,
    responses(
        (status = 200, description = "Ambulance dispatched", body = DispatchRes),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Hospital not in the ranking"),
        (status = 500, description = "Internal server error")
    )
)]
/// Dispatch an ambulance from a hospital selected from the ranking
///
/// The ranking is recomputed from the same symptoms, location and limit the client used, and
/// the hospital must appear in it.
///
/// # Errors
/// Returns `400 Bad Request` for the same reasons as `/hospitals/rank` or when no symptoms are
/// given, and `404 Not Found` if `hospital_id` is not in the ranking.
#[axum::debug_handler]
async fn dispatch_ambulance(
    State(state): State<AppState>,
    Json(req): Json<DispatchReq>,
) -> Result<Json<DispatchRes>, ApiError> {
    let symptoms = parse_symptoms(req.symptoms)?;
    let origin = parse_origin(req.latitude, req.longitude)?;
    let facilities = load_facilities(&state, origin)?;

    let ranked = match state
        .matcher
        .recommend(&facilities, &symptoms, parse_limit(req.limit))
    {
        Ok(MatchOutcome::Ranked(ranked)) => ranked,
        Ok(MatchOutcome::NoSymptoms) => {
            return Err((StatusCode::BAD_REQUEST, "Select symptoms before dispatching"))
        }
        Err(e) => return Err(error_response("Dispatch", &e)),
    };

    let Some(selected) = ranked
        .iter()
        .find(|s| s.facility.id.as_str() == req.hospital_id)
    else {
        tracing::warn!("Dispatch requested for unranked hospital: {}", req.hospital_id);
        return Err((StatusCode::NOT_FOUND, "Hospital not in ranking"));
    };

    dispatch(selected, &TracingDispatchNotifier);
    let record = state.dispatch_log.record(&selected.facility);

    Ok(Json(dispatch_res(&record)))
}

#[utoipa::path(
    get,
    path = "/dispatches",
    responses(
        (status = 200, description = "Dispatches since the server started, oldest first", body = ListDispatchesRes)
    )
)]
/// List dispatches recorded by this server
#[axum::debug_handler]
async fn list_dispatches(State(state): State<AppState>) -> Json<ListDispatchesRes> {
    let dispatches = state
        .dispatch_log
        .records()
        .iter()
        .map(dispatch_res)
        .collect();
    Json(ListDispatchesRes { dispatches })
}

// Helper functions

fn error_response(context: &str, e: &EraError) -> ApiError {
    match e {
        EraError::InvalidArgument(_) => {
            tracing::warn!("{} rejected: {}", context, e);
            (StatusCode::BAD_REQUEST, "Invalid argument")
        }
        _ => {
            tracing::error!("{} error: {:?}", context, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

fn parse_symptoms(raw: Vec<String>) -> Result<SymptomSelection, ApiError> {
    raw.iter()
        .map(|s| Symptom::new(s))
        .collect::<Result<SymptomSelection, _>>()
        .map_err(|e| {
            tracing::warn!("Invalid symptom: {}", e);
            (StatusCode::BAD_REQUEST, "Invalid symptom")
        })
}

fn parse_origin(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Coordinates>, ApiError> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => Coordinates::new(lat, lon).map(Some).map_err(|e| {
            tracing::warn!("Invalid coordinates: {}", e);
            (StatusCode::BAD_REQUEST, "Invalid coordinates")
        }),
        _ => Err((
            StatusCode::BAD_REQUEST,
            "latitude and longitude must be given together",
        )),
    }
}

/// Non-positive limits become zero so the matcher rejects them.
fn parse_limit(limit: Option<i64>) -> Option<usize> {
    limit.map(|n| usize::try_from(n).unwrap_or(0))
}

fn load_facilities(
    state: &AppState,
    origin: Option<Coordinates>,
) -> Result<Vec<Facility>, ApiError> {
    state
        .source
        .facilities(origin)
        .map_err(|e| error_response("Facility source", &e))
}

fn hospital_res(f: &Facility) -> HospitalRes {
    HospitalRes {
        id: f.id.to_string(),
        name: f.name.to_string(),
        address: f.address.to_string(),
        latitude: f.coordinates.latitude(),
        longitude: f.coordinates.longitude(),
        distance_km: f.distance.km(),
        phone: f.phone.to_string(),
        specialties: f.specialties.iter().map(|s| s.to_string()).collect(),
        estimated_arrival_minutes: f.estimated_arrival_minutes,
        kind: f.kind.as_ref().map(|k| k.to_string()),
        emergency_number: f.emergency_number.as_ref().map(|n| n.to_string()),
    }
}

fn symptom_res(def: &SymptomDefinition) -> SymptomRes {
    SymptomRes {
        id: def.symptom.to_string(),
        label: def.label.to_string(),
        category: def.category.to_string(),
        specialties: def.specialties.iter().map(|s| s.to_string()).collect(),
    }
}

fn dispatch_res(record: &DispatchRecord) -> DispatchRes {
    DispatchRes {
        dispatch_id: record.id.to_string(),
        hospital: hospital_res(&record.facility),
        message: dispatch_message(&record.facility),
        dispatched_at: record
            .dispatched_at
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    }
}
