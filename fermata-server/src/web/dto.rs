//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::NamedPoint;
use crate::locations::MatchTier;

/// Query for `/locations/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub q: String,
    /// Defaults to 10, capped at 50
    pub limit: Option<usize>,
}

/// Query for `/locations/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub q: String,
}

/// Query for `/route/plan`.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub origin: String,
    pub destination: String,
    /// Local departure time as "HH:MM"
    pub depart_at: Option<String>,
}

/// Body for `POST /route/directions`. Points are `[lat, lng]`.
#[derive(Debug, Deserialize)]
pub struct DirectionsRequest {
    pub origin: [f64; 2],
    pub destination: [f64; 2],
    #[serde(default)]
    pub waypoints: Vec<[f64; 2]>,
    #[serde(default)]
    pub include_instructions: bool,
}

/// Query for `GET /route/directions`.
#[derive(Debug, Deserialize)]
pub struct DirectionsQuery {
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub dest_lat: f64,
    pub dest_lng: f64,
    #[serde(default)]
    pub include_instructions: bool,
}

/// Query for `/taxis/nearby`.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    pub lat: f64,
    pub lng: f64,
    /// Defaults to 5 km
    pub radius_km: Option<f64>,
}

/// Query for `/pricing/calculate`.
#[derive(Debug, Deserialize)]
pub struct FareRequest {
    pub distance_meters: f64,
    pub time_seconds: f64,
    #[serde(default)]
    pub is_night: bool,
    #[serde(default)]
    pub is_peak_hour: bool,
}

/// Query for `/pricing/estimate`.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub distance_meters: f64,
    pub time_seconds: f64,
}

/// Service health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy", or "degraded" when routing is unreachable
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub routing_available: bool,
    pub locations: usize,
    pub vehicles: usize,
}

/// A successful resolution.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub query: String,
    pub location: NamedPoint,
    pub tier: MatchTier,
}

/// Search results.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub locations: Vec<NamedPoint>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Stable machine-readable code
    pub code: &'static str,
}
