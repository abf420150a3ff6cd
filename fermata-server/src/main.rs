use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fermata_server::config::AppConfig;
use fermata_server::locations::{Gazetteer, LocationResolver, ResolverConfig};
use fermata_server::planner::{PlannerConfig, TripPlanner};
use fermata_server::pricing::FareCalculator;
use fermata_server::routing::{CacheConfig, CachedRouter, GebetaClient};
use fermata_server::store::InMemoryStore;
use fermata_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Routing client behind a response cache
    let gebeta = GebetaClient::new(config.gebeta.clone()).expect("Failed to create Gebeta client");
    let router = CachedRouter::new(gebeta, &CacheConfig::default());

    // Load the location store (fail fast if unavailable)
    let store = InMemoryStore::load(&config.seed_file).expect("Failed to load location store");
    info!(
        path = %config.seed_file.display(),
        locations = store.location_count().await,
        vehicles = store.vehicle_count().await,
        "Loaded location store"
    );

    // Spawn background task to reload the snapshot
    let refresh_store = store.clone();
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresh_store.reload().await {
                Ok(count) => info!(locations = count, "Reloaded location store"),
                Err(e) => warn!(error = %e, "Failed to reload location store"),
            }
        }
    });

    let resolver = LocationResolver::new(Arc::new(Gazetteer::addis_ababa()), ResolverConfig::default());
    let planner = TripPlanner::new(
        store,
        router,
        resolver,
        FareCalculator::default(),
        PlannerConfig::default(),
    );

    let app = create_router(AppState::new(planner));

    info!(addr = %config.bind_addr, "Fermata listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
