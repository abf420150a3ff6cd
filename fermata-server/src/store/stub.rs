//! Scriptable store for unit tests.
//!
//! A `StubStore` is both the store and its session: every acquired session
//! is a clone sharing the same query counter, so tests can assert on how
//! many store calls a request made.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{LatLng, NamedPoint, VehicleRecord, VehicleStatus};

use super::{LikePattern, LocationStore, StoreError, StoreSession};

#[derive(Clone, Default)]
pub(crate) struct StubStore {
    locations: Vec<NamedPoint>,
    vehicles: Vec<VehicleRecord>,
    fail_queries: bool,
    fail_vehicles: bool,
    fail_acquire: bool,
    queries: Arc<AtomicUsize>,
}

impl StubStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_location(mut self, name: &str, lat: f64, lng: f64) -> Self {
        self.locations.push(NamedPoint::new(name, lat, lng).unwrap());
        self
    }

    pub(crate) fn with_vehicle(mut self, vehicle: VehicleRecord) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    /// Every location query fails.
    pub(crate) fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// Only the vehicle listing fails.
    pub(crate) fn failing_vehicles(mut self) -> Self {
        self.fail_vehicles = true;
        self
    }

    /// Sessions cannot be acquired.
    pub(crate) fn failing_acquire(mut self) -> Self {
        self.fail_acquire = true;
        self
    }

    pub(crate) fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<(), StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_queries {
            return Err(StoreError::Query {
                message: "connection reset".to_string(),
            });
        }
        Ok(())
    }
}

pub(crate) fn vehicle(id: &str, lat: f64, lng: f64, status: VehicleStatus) -> VehicleRecord {
    VehicleRecord {
        id: id.to_string(),
        plate_number: format!("AA-{id}"),
        model: Some("Toyota Corolla".to_string()),
        color: None,
        driver_name: None,
        position: LatLng::new(lat, lng).unwrap(),
        status,
        rating: 4.2,
        trip_count: 12,
    }
}

impl LocationStore for StubStore {
    type Session = StubStore;

    async fn acquire(&self) -> Result<StubStore, StoreError> {
        if self.fail_acquire {
            return Err(StoreError::Query {
                message: "pool exhausted".to_string(),
            });
        }
        Ok(self.clone())
    }
}

impl StoreSession for StubStore {
    async fn find_by_name_like(
        &self,
        pattern: &LikePattern,
    ) -> Result<Option<NamedPoint>, StoreError> {
        self.record()?;
        Ok(self
            .locations
            .iter()
            .find(|p| pattern.matches(p.name()))
            .cloned())
    }

    async fn search_by_name_or_description(
        &self,
        substring: &str,
        limit: usize,
    ) -> Result<Vec<NamedPoint>, StoreError> {
        self.record()?;
        let pattern = LikePattern::contains(substring);
        Ok(self
            .locations
            .iter()
            .filter(|p| pattern.matches(p.name()))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_active(&self) -> Result<Vec<NamedPoint>, StoreError> {
        self.record()?;
        Ok(self.locations.clone())
    }

    async fn list_available_vehicles(&self) -> Result<Vec<VehicleRecord>, StoreError> {
        self.record()?;
        if self.fail_vehicles {
            return Err(StoreError::Query {
                message: "vehicles table locked".to_string(),
            });
        }
        // Returned unfiltered; callers check status.
        Ok(self.vehicles.clone())
    }
}
