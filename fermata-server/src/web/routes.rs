//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveTime};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{ErrorKind, InvalidCoordinates, LatLng, NamedPoint, VehicleRecord};
use crate::locations::{PopularRoute, ResolutionOutcome};
use crate::planner::{PlanError, PlanOptions, TripPlan};
use crate::pricing::{FareBreakdown, FareRange, PricingConfig};
use crate::routing::{Route, RouteRequest};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

const DEFAULT_SEARCH_LIMIT: usize = 10;
const MAX_SEARCH_LIMIT: usize = 50;
const DEFAULT_NEARBY_RADIUS_KM: f64 = 5.0;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/locations", get(list_locations))
        .route("/locations/search", get(search_locations))
        .route("/locations/resolve", get(resolve_location))
        .route("/route/plan", get(plan_trip))
        .route(
            "/route/directions",
            get(directions_by_query).post(directions_by_body),
        )
        .route("/routes/popular", get(popular_routes))
        .route("/routes/:id", get(popular_route))
        .route("/route/quick/:id", get(plan_popular_route))
        .route("/taxis/nearby", get(nearby_taxis))
        .route("/pricing/calculate", get(calculate_fare))
        .route("/pricing/estimate", get(estimate_fare))
        .route("/pricing/info", get(pricing_info))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let planner = &state.planner;
    let routing_available = planner.router().inner().health_check().await;

    Json(HealthResponse {
        status: if routing_available { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Local::now().to_rfc3339(),
        routing_available,
        locations: planner.store().location_count().await,
        vehicles: planner.store().vehicle_count().await,
    })
}

async fn list_locations(State(state): State<AppState>) -> Json<Vec<NamedPoint>> {
    Json(state.planner.locations().await)
}

async fn search_locations(
    State(state): State<AppState>,
    Query(req): Query<SearchRequest>,
) -> Json<SearchResponse> {
    let limit = req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_SEARCH_LIMIT);
    let locations = state.planner.search(&req.q, limit).await;
    Json(SearchResponse { locations })
}

async fn resolve_location(
    State(state): State<AppState>,
    Query(req): Query<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    match state.planner.resolve(&req.q).await {
        ResolutionOutcome::Resolved { point, tier } => Ok(Json(ResolveResponse {
            query: req.q,
            location: point,
            tier,
        })),
        ResolutionOutcome::Unresolved => Err(AppError::new(
            ErrorKind::NotFound,
            "LOCATION_NOT_FOUND",
            format!("Could not find location: '{}'", req.q),
        )),
    }
}

async fn plan_trip(
    State(state): State<AppState>,
    Query(req): Query<PlanRequest>,
) -> Result<Json<TripPlan>, AppError> {
    let mut options = PlanOptions::default();
    if let Some(depart_at) = req.depart_at.as_deref().filter(|s| !s.is_empty()) {
        let time = NaiveTime::parse_from_str(depart_at, "%H:%M").map_err(|_| {
            AppError::invalid(format!("Invalid departure time '{depart_at}', expected HH:MM"))
        })?;
        options = options.departing_at(time);
    }

    let plan = state
        .planner
        .plan_with(&req.origin, &req.destination, &options)
        .await?;
    Ok(Json(plan))
}

async fn popular_routes(State(state): State<AppState>) -> Json<Vec<PopularRoute>> {
    Json(state.planner.popular_routes())
}

async fn popular_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PopularRoute>, AppError> {
    Ok(Json(state.planner.popular_route(&id)?))
}

async fn plan_popular_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TripPlan>, AppError> {
    Ok(Json(state.planner.plan_popular(&id).await?))
}

async fn directions_by_query(
    State(state): State<AppState>,
    Query(req): Query<DirectionsQuery>,
) -> Result<Json<Route>, AppError> {
    let request = RouteRequest::between(
        LatLng::new(req.origin_lat, req.origin_lng)?,
        LatLng::new(req.dest_lat, req.dest_lng)?,
    )
    .with_instructions(req.include_instructions);

    Ok(Json(state.planner.directions(&request).await?))
}

async fn directions_by_body(
    State(state): State<AppState>,
    Json(req): Json<DirectionsRequest>,
) -> Result<Json<Route>, AppError> {
    let point = |[lat, lng]: [f64; 2]| LatLng::new(lat, lng);
    let waypoints = req
        .waypoints
        .iter()
        .copied()
        .map(point)
        .collect::<Result<Vec<_>, _>>()?;
    let request = RouteRequest::between(point(req.origin)?, point(req.destination)?)
        .with_waypoints(waypoints)
        .with_instructions(req.include_instructions);

    Ok(Json(state.planner.directions(&request).await?))
}

async fn nearby_taxis(
    State(state): State<AppState>,
    Query(req): Query<NearbyRequest>,
) -> Result<Json<Vec<VehicleRecord>>, AppError> {
    let center = LatLng::new(req.lat, req.lng)?;
    let radius_km = req.radius_km.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(AppError::invalid(format!(
            "radius_km must be positive, got {radius_km}"
        )));
    }

    Ok(Json(state.planner.find_available(center, radius_km).await?))
}

async fn calculate_fare(
    State(state): State<AppState>,
    Query(req): Query<FareRequest>,
) -> Result<Json<FareBreakdown>, AppError> {
    check_trip(req.distance_meters, req.time_seconds)?;
    Ok(Json(state.planner.calculate_fare(
        req.distance_meters,
        req.time_seconds,
        req.is_night,
        req.is_peak_hour,
    )))
}

async fn estimate_fare(
    State(state): State<AppState>,
    Query(req): Query<EstimateRequest>,
) -> Result<Json<FareRange>, AppError> {
    check_trip(req.distance_meters, req.time_seconds)?;
    Ok(Json(
        state
            .planner
            .estimate_fare_range(req.distance_meters, req.time_seconds),
    ))
}

async fn pricing_info(State(state): State<AppState>) -> Json<PricingConfig> {
    Json(state.planner.pricing().clone())
}

/// Reject negative or non-finite trip measurements.
fn check_trip(distance_meters: f64, time_seconds: f64) -> Result<(), AppError> {
    for (name, value) in [("distance_meters", distance_meters), ("time_seconds", time_seconds)] {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::invalid(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }
    }
    Ok(())
}

/// Application error type.
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    code: &'static str,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, "INVALID_INPUT", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::UpstreamFailure => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        AppError::new(e.kind(), e.code(), e.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::new(e.kind(), "STORE_UNAVAILABLE", e.to_string())
    }
}

impl From<InvalidCoordinates> for AppError {
    fn from(e: InvalidCoordinates) -> Self {
        AppError::new(e.kind(), "INVALID_INPUT", e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, code = self.code, message = %self.message, "Request failed");

        let body = Json(ErrorResponse {
            error: self.message,
            code: self.code,
        });
        (status, body).into_response()
    }
}
