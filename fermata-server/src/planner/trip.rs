//! The trip planner and its result types.

use std::fmt;

use chrono::NaiveTime;
use futures::future::join;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{ErrorKind, LatLng, NamedPoint, VehicleRecord};
use crate::fleet;
use crate::locations::{
    LocationResolver, MatchTier, PopularRoute, ResolutionOutcome, popular_endpoints,
    popular_route, popular_routes,
};
use crate::pricing::{FareBreakdown, FareCalculator, FareRange, PricingConfig, TimePeriod};
use crate::routing::{Route, RouteProvider, RouteRequest, RoutingError};
use crate::store::{LocationStore, StoreError, StoreSession};

use super::config::PlannerConfig;

/// Which end of a trip a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Origin,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Origin => f.write_str("origin"),
            Side::Destination => f.write_str("destination"),
        }
    }
}

/// Errors from trip planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Every resolution tier failed for one side
    #[error("Could not find {side} location: '{query}'")]
    LocationNotFound { side: Side, query: String },

    /// The routing provider failed or did not answer in time
    #[error("{0}")]
    RouteUnavailable(RoutingError),

    /// No popular route has this id
    #[error("Route with ID '{0}' not found")]
    UnknownRoute(String),
}

impl PlanError {
    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            PlanError::LocationNotFound { .. } => "LOCATION_NOT_FOUND",
            PlanError::RouteUnavailable(_) => "ROUTE_UNAVAILABLE",
            PlanError::UnknownRoute(_) => "ROUTE_NOT_FOUND",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::LocationNotFound { .. } | PlanError::UnknownRoute(_) => ErrorKind::NotFound,
            PlanError::RouteUnavailable(e) => e.kind(),
        }
    }
}

/// Per-request planning options.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Local departure time; selects night and peak surcharges.
    pub departure_time: Option<NaiveTime>,
}

impl PlanOptions {
    pub fn departing_at(mut self, time: NaiveTime) -> Self {
        self.departure_time = Some(time);
        self
    }
}

/// A planned taxi trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    pub origin: NamedPoint,
    pub destination: NamedPoint,
    /// How the origin text was resolved; absent for popular routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_tier: Option<MatchTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tier: Option<MatchTier>,
    pub route: Route,
    pub fare: FareBreakdown,
    pub fare_range: FareRange,
    pub nearby_vehicles: Vec<VehicleRecord>,
}

/// Composes resolution, routing, pricing and fleet search.
///
/// Stateless between requests: each call acquires its own store session
/// and drops it before returning.
pub struct TripPlanner<S, R> {
    store: S,
    router: R,
    resolver: LocationResolver,
    fares: FareCalculator,
    config: PlannerConfig,
}

impl<S: LocationStore, R: RouteProvider> TripPlanner<S, R> {
    pub fn new(
        store: S,
        router: R,
        resolver: LocationResolver,
        fares: FareCalculator,
        config: PlannerConfig,
    ) -> Self {
        Self {
            store,
            router,
            resolver,
            fares,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a trip between two free-text places.
    pub async fn plan(&self, origin: &str, destination: &str) -> Result<TripPlan, PlanError> {
        self.plan_with(origin, destination, &PlanOptions::default())
            .await
    }

    /// Plan a trip with explicit options.
    ///
    /// Fails with [`PlanError::LocationNotFound`] naming the origin when
    /// both sides are unresolved.
    pub async fn plan_with(
        &self,
        origin: &str,
        destination: &str,
        options: &PlanOptions,
    ) -> Result<TripPlan, PlanError> {
        let session = self.session().await;

        let (from, to) = join(
            self.resolver.resolve(&session, origin),
            self.resolver.resolve(&session, destination),
        )
        .await;

        let ResolutionOutcome::Resolved {
            point: origin_point,
            tier: origin_tier,
        } = from
        else {
            return Err(PlanError::LocationNotFound {
                side: Side::Origin,
                query: origin.to_string(),
            });
        };
        let ResolutionOutcome::Resolved {
            point: destination_point,
            tier: destination_tier,
        } = to
        else {
            return Err(PlanError::LocationNotFound {
                side: Side::Destination,
                query: destination.to_string(),
            });
        };

        let mut plan = self
            .complete(&session, origin_point, destination_point, options)
            .await?;
        plan.origin_tier = Some(origin_tier);
        plan.destination_tier = Some(destination_tier);
        Ok(plan)
    }

    /// Plan one of the predefined popular routes, skipping resolution.
    pub async fn plan_popular(&self, route_id: &str) -> Result<TripPlan, PlanError> {
        let route = self.popular_route(route_id)?;

        let session = self.session().await;
        self.complete(
            &session,
            route.origin,
            route.destination,
            &PlanOptions::default(),
        )
        .await
    }

    /// Resolve one place name.
    pub async fn resolve(&self, text: &str) -> ResolutionOutcome {
        let session = self.session().await;
        self.resolver.resolve(&session, text).await
    }

    /// Places whose name contains `query`, at most `limit`.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<NamedPoint> {
        let session = self.session().await;
        self.resolver.search(&session, query, limit).await
    }

    /// Available vehicles near a point.
    pub async fn find_available(
        &self,
        center: LatLng,
        radius_km: f64,
    ) -> Result<Vec<VehicleRecord>, StoreError> {
        let session = self.store.acquire().await?;
        fleet::find_available(&session, center, radius_km).await
    }

    pub fn calculate_fare(
        &self,
        distance_meters: f64,
        time_seconds: f64,
        is_night: bool,
        is_peak_hour: bool,
    ) -> FareBreakdown {
        self.fares
            .calculate_fare(distance_meters, time_seconds, is_night, is_peak_hour)
    }

    pub fn estimate_fare_range(&self, distance_meters: f64, time_seconds: f64) -> FareRange {
        self.fares.estimate_fare_range(distance_meters, time_seconds)
    }

    pub fn pricing(&self) -> &PricingConfig {
        self.fares.config()
    }

    /// All active stored locations.
    ///
    /// Falls back to the popular-route endpoints when the store has none or
    /// cannot be queried.
    pub async fn locations(&self) -> Vec<NamedPoint> {
        let session = self.session().await;
        match session.list_active().await {
            Ok(points) if !points.is_empty() => points,
            Ok(_) => popular_endpoints(),
            Err(e) => {
                warn!(error = %e, "Listing locations failed, using popular endpoints");
                popular_endpoints()
            }
        }
    }

    pub fn popular_routes(&self) -> Vec<PopularRoute> {
        popular_routes()
    }

    pub fn popular_route(&self, route_id: &str) -> Result<PopularRoute, PlanError> {
        popular_route(route_id).ok_or_else(|| PlanError::UnknownRoute(route_id.to_string()))
    }

    /// Route between explicit coordinates, with the same bounded wait as
    /// a plan. No resolution, pricing or vehicle search.
    pub async fn directions(&self, request: &RouteRequest) -> Result<Route, PlanError> {
        self.route(request).await
    }

    /// Acquire a session, or `None` when the store is unavailable.
    async fn session(&self) -> Option<S::Session> {
        match self.store.acquire().await {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "Store session unavailable, continuing without store");
                None
            }
        }
    }

    /// Route, price and find vehicles for two resolved points.
    async fn complete<T: StoreSession>(
        &self,
        session: &T,
        origin: NamedPoint,
        destination: NamedPoint,
        options: &PlanOptions,
    ) -> Result<TripPlan, PlanError> {
        let request = RouteRequest::between(origin.position(), destination.position());
        let route = self.route(&request).await?;

        let period = options
            .departure_time
            .map(TimePeriod::at)
            .unwrap_or_default();
        let fare = self.fares.calculate_fare(
            route.distance_meters,
            route.time_seconds,
            period.is_night,
            period.is_peak,
        );
        let fare_range = self
            .fares
            .estimate_fare_range(route.distance_meters, route.time_seconds);

        let nearby_vehicles =
            match fleet::find_available(session, origin.position(), self.config.nearby_radius_km)
                .await
            {
                Ok(vehicles) => vehicles,
                Err(e) => {
                    warn!(origin = origin.name(), error = %e, "Nearby vehicle search failed");
                    Vec::new()
                }
            };

        info!(
            origin = origin.name(),
            destination = destination.name(),
            distance_meters = route.distance_meters,
            fare = fare.total_fare,
            nearby = nearby_vehicles.len(),
            "Trip planned"
        );

        Ok(TripPlan {
            origin,
            destination,
            origin_tier: None,
            destination_tier: None,
            route,
            fare,
            fare_range,
            nearby_vehicles,
        })
    }

    async fn route(&self, request: &RouteRequest) -> Result<Route, PlanError> {
        match tokio::time::timeout(self.config.route_timeout, self.router.route(request)).await {
            Ok(Ok(route)) => Ok(route),
            Ok(Err(e)) => {
                warn!(error = %e, "Routing failed");
                Err(PlanError::RouteUnavailable(e))
            }
            Err(_) => {
                warn!(timeout = ?self.config.route_timeout, "Routing timed out");
                Err(PlanError::RouteUnavailable(RoutingError::Timeout))
            }
        }
    }
}

impl<S, R> fmt::Debug for TripPlanner<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripPlanner")
            .field("resolver", &self.resolver)
            .field("fares", &self.fares)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
