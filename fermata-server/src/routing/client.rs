//! Gebeta Directions HTTP client.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::LatLng;

use super::RouteProvider;
use super::error::RoutingError;
use super::types::{DirectionsResponse, Route, RouteRequest};

/// Default Gebeta Directions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://mapapi.gebeta.app/api/route/direction/";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Health checks route between these two points.
const HEALTH_ORIGIN: LatLng = LatLng::from_static(8.989022, 38.79036);
const HEALTH_DESTINATION: LatLng = LatLng::from_static(9.03045, 38.76530);

/// Configuration for the Gebeta client.
#[derive(Debug, Clone)]
pub struct GebetaConfig {
    /// API key sent as the `apiKey` query parameter
    pub api_key: String,
    /// Directions endpoint URL
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl GebetaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Gebeta Directions API client.
#[derive(Debug, Clone)]
pub struct GebetaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GebetaClient {
    pub fn new(config: GebetaConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Whether the API currently answers a known-good route.
    pub async fn health_check(&self) -> bool {
        let request = RouteRequest::between(HEALTH_ORIGIN, HEALTH_DESTINATION);
        match self.route(&request).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Gebeta health check failed");
                false
            }
        }
    }

    fn query(&self, request: &RouteRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("origin", request.origin.to_string()),
            ("destination", request.destination.to_string()),
            ("apiKey", self.api_key.clone()),
            (
                "instruction",
                if request.include_instructions { "1" } else { "0" }.to_string(),
            ),
        ];

        if !request.waypoints.is_empty() {
            let waypoints: Vec<String> = request.waypoints.iter().map(LatLng::to_string).collect();
            params.push(("waypoints", waypoints.join(";")));
        }

        params
    }
}

impl RouteProvider for GebetaClient {
    async fn route(&self, request: &RouteRequest) -> Result<Route, RoutingError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&self.query(request))
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "Gebeta request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Gebeta API error");
            return Err(RoutingError::from_status(status.as_u16()));
        }

        let body = response.text().await?;
        let directions: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Decode(e.to_string()))?;

        let route = Route::from(directions);
        debug!(
            origin = %request.origin,
            destination = %request.destination,
            distance_meters = route.distance_meters,
            time_seconds = route.time_seconds,
            "Route computed"
        );
        Ok(route)
    }
}
