//! Caching layer for route lookups.
//!
//! Routes between the same points rarely change within minutes, and plan
//! requests cluster on a handful of popular pairs. Coordinates are keyed
//! at micro-degree precision (about 11 cm) so equal points always hit.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::LatLng;

use super::error::RoutingError;
use super::types::{Route, RouteRequest};
use super::RouteProvider;

/// A coordinate in whole micro-degrees.
type MicroPoint = (i64, i64);

/// Cache key: (origin, destination, waypoints, instructions flag).
type RouteKey = (MicroPoint, MicroPoint, Vec<MicroPoint>, bool);

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

fn micro(point: &LatLng) -> MicroPoint {
    (
        (point.lat() * 1e6).round() as i64,
        (point.lng() * 1e6).round() as i64,
    )
}

fn route_key(request: &RouteRequest) -> RouteKey {
    (
        micro(&request.origin),
        micro(&request.destination),
        request.waypoints.iter().map(micro).collect(),
        request.include_instructions,
    )
}

/// Route provider with caching.
///
/// Wraps any [`RouteProvider`] and caches successful routes. Failures are
/// never cached.
pub struct CachedRouter<R> {
    inner: R,
    routes: MokaCache<RouteKey, Arc<Route>>,
}

impl<R: RouteProvider> CachedRouter<R> {
    pub fn new(inner: R, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, routes }
    }

    /// Access the underlying provider for calls that bypass the cache.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.routes.invalidate_all();
    }
}

impl<R: RouteProvider> RouteProvider for CachedRouter<R> {
    async fn route(&self, request: &RouteRequest) -> Result<Route, RoutingError> {
        let key = route_key(request);

        if let Some(cached) = self.routes.get(&key).await {
            debug!(origin = %request.origin, destination = %request.destination, "Route cache hit");
            return Ok(Route::clone(&cached));
        }

        let route = self.inner.route(request).await?;
        self.routes.insert(key, Arc::new(route.clone())).await;

        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Counts calls; fails while `fail` is set.
    #[derive(Default)]
    struct CountingRouter {
        calls: AtomicUsize,
        fail: bool,
    }

    impl RouteProvider for CountingRouter {
        async fn route(&self, _request: &RouteRequest) -> Result<Route, RoutingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RoutingError::RateLimited);
            }
            Ok(Route {
                distance_meters: 8500.0,
                time_seconds: 900.0,
                coordinates: Vec::new(),
                message: "OK".to_string(),
                instructions: None,
            })
        }
    }

    fn point(lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng).unwrap()
    }

    fn request() -> RouteRequest {
        RouteRequest::between(point(8.989022, 38.79036), point(9.03045, 38.7653))
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn key_rounds_to_micro_degrees() {
        let a = RouteRequest::between(point(9.0000001, 38.0), point(9.1, 38.1));
        let b = RouteRequest::between(point(9.0000004, 38.0), point(9.1, 38.1));
        assert_eq!(route_key(&a), route_key(&b));

        let c = RouteRequest::between(point(9.000001, 38.0), point(9.1, 38.1));
        assert_ne!(route_key(&a), route_key(&c));
    }

    #[test]
    fn key_separates_options() {
        let plain = request();
        let with_steps = request().with_instructions(true);
        let via = request().with_waypoints(vec![point(9.0, 38.77)]);

        assert_ne!(route_key(&plain), route_key(&with_steps));
        assert_ne!(route_key(&plain), route_key(&via));
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let router = CachedRouter::new(CountingRouter::default(), &CacheConfig::default());

        let first = router.route(&request()).await.unwrap();
        let second = router.route(&request()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(router.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let failing = CountingRouter {
            fail: true,
            ..Default::default()
        };
        let router = CachedRouter::new(failing, &CacheConfig::default());

        assert!(router.route(&request()).await.is_err());
        assert!(router.route(&request()).await.is_err());
        assert_eq!(router.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidation_forces_refetch() {
        let router = CachedRouter::new(CountingRouter::default(), &CacheConfig::default());

        router.route(&request()).await.unwrap();
        router.invalidate_cache();
        router.route(&request()).await.unwrap();

        assert_eq!(router.inner().calls.load(Ordering::SeqCst), 2);
    }
}
