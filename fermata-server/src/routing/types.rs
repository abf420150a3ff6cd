//! Route request and response types, plus the Gebeta wire format.

use serde::{Deserialize, Serialize};

use crate::domain::LatLng;

/// A routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: LatLng,
    pub destination: LatLng,
    pub waypoints: Vec<LatLng>,
    pub include_instructions: bool,
}

impl RouteRequest {
    /// Direct route without waypoints or instructions.
    pub fn between(origin: LatLng, destination: LatLng) -> Self {
        Self {
            origin,
            destination,
            waypoints: Vec::new(),
            include_instructions: false,
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<LatLng>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn with_instructions(mut self, include: bool) -> Self {
        self.include_instructions = include;
        self
    }
}

/// A computed road route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub distance_meters: f64,
    pub time_seconds: f64,
    /// Path points as returned by the provider.
    pub coordinates: Vec<[f64; 2]>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
}

/// Successful Gebeta Directions response body.
///
/// Gebeta omits fields rather than sending zeroes in some responses.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct DirectionsResponse {
    #[serde(rename = "totalDistance", default)]
    pub total_distance: f64,
    #[serde(default)]
    pub timetaken: f64,
    #[serde(default)]
    pub direction: Vec<[f64; 2]>,
    pub msg: Option<String>,
    pub instructions: Option<Vec<serde_json::Value>>,
}

impl From<DirectionsResponse> for Route {
    fn from(body: DirectionsResponse) -> Self {
        let instructions = body.instructions.map(|steps| {
            steps
                .into_iter()
                .map(|step| match step {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                })
                .collect()
        });

        Route {
            distance_meters: body.total_distance,
            time_seconds: body.timetaken,
            coordinates: body.direction,
            message: body.msg.unwrap_or_else(|| "OK".to_string()),
            instructions,
        }
    }
}
