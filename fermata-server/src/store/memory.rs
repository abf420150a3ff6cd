//! In-memory store backed by a JSON snapshot.
//!
//! Loads locations and taxis from a snapshot file and serves them as if
//! they were database rows. The snapshot can be reloaded while the server
//! runs; in-flight sessions keep reading the data they started with until
//! they are dropped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::{LatLng, LocationType, NamedPoint, VehicleRecord, VehicleStatus};

use super::error::StoreError;
use super::pattern::LikePattern;
use super::{LocationStore, StoreSession};

/// On-disk snapshot layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub locations: Vec<LocationRecord>,
    #[serde(default)]
    pub taxis: Vec<TaxiRecord>,
}

/// A location row as stored in the snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub location_type: LocationType,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

/// A taxi row as stored in the snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxiRecord {
    pub id: String,
    pub plate_number: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub current_lat: Option<f64>,
    #[serde(default)]
    pub current_lng: Option<f64>,
    pub status: VehicleStatus,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_trips: u32,
}

fn default_true() -> bool {
    true
}

/// A validated location held by the store.
#[derive(Debug, Clone)]
struct StoredLocation {
    point: NamedPoint,
    description: Option<String>,
    active: bool,
}

/// Validated snapshot contents.
#[derive(Debug, Default)]
struct StoreData {
    locations: Vec<StoredLocation>,
    vehicles: Vec<VehicleRecord>,
}

impl StoreData {
    /// Validate a snapshot, dropping rows with invalid names or coordinates.
    fn from_snapshot(snapshot: Snapshot) -> Self {
        let locations = snapshot
            .locations
            .into_iter()
            .filter_map(|row| match NamedPoint::new(row.name.as_str(), row.lat, row.lng) {
                Ok(point) => Some(StoredLocation {
                    point,
                    description: row.description,
                    active: row.is_active,
                }),
                Err(e) => {
                    warn!(name = %row.name, error = %e, "Skipping invalid location row");
                    None
                }
            })
            .collect();

        let vehicles = snapshot
            .taxis
            .into_iter()
            .filter(|row| row.is_active)
            .filter_map(|row| {
                let (Some(lat), Some(lng)) = (row.current_lat, row.current_lng) else {
                    debug!(plate = %row.plate_number, "Skipping taxi without a position");
                    return None;
                };
                match LatLng::new(lat, lng) {
                    Ok(position) => Some(VehicleRecord {
                        id: row.id,
                        plate_number: row.plate_number,
                        model: row.model,
                        color: row.color,
                        driver_name: row.driver_name,
                        position,
                        status: row.status,
                        rating: row.rating,
                        trip_count: row.total_trips,
                    }),
                    Err(e) => {
                        warn!(plate = %row.plate_number, error = %e, "Skipping taxi with invalid position");
                        None
                    }
                }
            })
            .collect();

        Self {
            locations,
            vehicles,
        }
    }

    fn active_locations(&self) -> impl Iterator<Item = &StoredLocation> {
        self.locations.iter().filter(|l| l.active)
    }
}

/// Store that serves a snapshot held in memory.
#[derive(Clone)]
pub struct InMemoryStore {
    data: Arc<RwLock<Arc<StoreData>>>,
    source: Option<PathBuf>,
}

impl InMemoryStore {
    /// Create a store from an in-memory snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            data: Arc::new(RwLock::new(Arc::new(StoreData::from_snapshot(snapshot)))),
            source: None,
        }
    }

    /// Create a store by loading a JSON snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| load_error(path, e))?;
        let snapshot = parse_snapshot(path, &json)?;
        Ok(Self {
            data: Arc::new(RwLock::new(Arc::new(StoreData::from_snapshot(snapshot)))),
            source: Some(path.to_path_buf()),
        })
    }

    /// Re-read the snapshot file this store was loaded from.
    ///
    /// On success, swaps in the new data and returns the number of
    /// locations. On failure, the existing data is preserved. Open sessions
    /// keep the data they were acquired with.
    pub async fn reload(&self) -> Result<usize, StoreError> {
        let Some(path) = &self.source else {
            return Err(StoreError::Load {
                path: "<memory>".to_string(),
                message: "store was not loaded from a file".to_string(),
            });
        };

        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| load_error(path, e))?;
        let data = StoreData::from_snapshot(parse_snapshot(path, &json)?);
        let count = data.locations.len();

        *self.data.write().await = Arc::new(data);

        Ok(count)
    }

    /// Number of stored locations, active or not.
    pub async fn location_count(&self) -> usize {
        self.data.read().await.locations.len()
    }

    /// Number of stored vehicles with a known position.
    pub async fn vehicle_count(&self) -> usize {
        self.data.read().await.vehicles.len()
    }

    /// The current data. The lock is held only long enough to clone the
    /// `Arc`.
    async fn current(&self) -> Arc<StoreData> {
        Arc::clone(&*self.data.read().await)
    }
}

fn load_error(path: &Path, e: impl std::fmt::Display) -> StoreError {
    StoreError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn parse_snapshot(path: &Path, json: &str) -> Result<Snapshot, StoreError> {
    serde_json::from_str(json).map_err(|e| load_error(path, e))
}

impl LocationStore for InMemoryStore {
    type Session = InMemorySession;

    async fn acquire(&self) -> Result<InMemorySession, StoreError> {
        Ok(InMemorySession {
            data: self.current().await,
        })
    }
}

/// A read session over the snapshot that was current when it was acquired.
pub struct InMemorySession {
    data: Arc<StoreData>,
}

impl StoreSession for InMemorySession {
    async fn find_by_name_like(
        &self,
        pattern: &LikePattern,
    ) -> Result<Option<NamedPoint>, StoreError> {
        Ok(self
            .data
            .active_locations()
            .find(|l| pattern.matches(l.point.name()))
            .map(|l| l.point.clone()))
    }

    async fn search_by_name_or_description(
        &self,
        substring: &str,
        limit: usize,
    ) -> Result<Vec<NamedPoint>, StoreError> {
        let pattern = LikePattern::contains(substring);
        Ok(self
            .data
            .active_locations()
            .filter(|l| {
                pattern.matches(l.point.name())
                    || l.description.as_deref().is_some_and(|d| pattern.matches(d))
            })
            .take(limit)
            .map(|l| l.point.clone())
            .collect())
    }

    async fn list_active(&self) -> Result<Vec<NamedPoint>, StoreError> {
        Ok(self
            .data
            .active_locations()
            .map(|l| l.point.clone())
            .collect())
    }

    async fn list_available_vehicles(&self) -> Result<Vec<VehicleRecord>, StoreError> {
        Ok(self
            .data
            .vehicles
            .iter()
            .filter(|v| v.is_available())
            .cloned()
            .collect())
    }
}
