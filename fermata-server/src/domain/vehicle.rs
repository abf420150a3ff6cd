//! Fleet vehicle types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::point::LatLng;

/// Operational status of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Busy,
    Offline,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Busy => "busy",
            VehicleStatus::Offline => "offline",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a stored location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Origin,
    Destination,
    Waypoint,
    TaxiStand,
    #[default]
    Landmark,
}

/// A snapshot of one vehicle as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    pub id: String,
    pub plate_number: String,
    pub model: Option<String>,
    pub color: Option<String>,
    pub driver_name: Option<String>,
    pub position: LatLng,
    pub status: VehicleStatus,
    pub rating: f64,
    pub trip_count: u32,
}

impl VehicleRecord {
    /// Whether the vehicle can take a new trip.
    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}
