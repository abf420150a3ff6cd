//! Nearby-vehicle search over the fleet snapshot.
//!
//! The search area is an approximate bounding box, not a circle:
//!
//! - latitude delta is `radius_km / 111`
//! - longitude delta is `radius_km / (111 · |lat|)`
//!
//! The longitude formula divides by the latitude itself, so it grows
//! without bound towards the equator (at exactly 0° the box spans every
//! longitude), and the rectangle's corners reach about 41% further than
//! the radius. Both are existing behaviour that callers may depend on;
//! they are kept as-is pending a product decision.

use serde::Serialize;
use tracing::debug;

use crate::domain::{LatLng, VehicleRecord};
use crate::store::{StoreError, StoreSession};

/// Kilometres per degree used by the box approximation.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Rectangular coordinate range around a centre point. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Box of `radius_km` around `center`.
    pub fn around(center: LatLng, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE;
        let lng_delta = radius_km / (KM_PER_DEGREE * center.lat().abs());

        Self {
            min_lat: center.lat() - lat_delta,
            max_lat: center.lat() + lat_delta,
            min_lng: center.lng() - lng_delta,
            max_lng: center.lng() + lng_delta,
        }
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }
}

/// Available vehicles inside the box of `radius_km` around `center`.
///
/// Results keep the store's order.
pub async fn find_available<S: StoreSession>(
    session: &S,
    center: LatLng,
    radius_km: f64,
) -> Result<Vec<VehicleRecord>, StoreError> {
    let area = BoundingBox::around(center, radius_km);
    let vehicles = session.list_available_vehicles().await?;
    let total = vehicles.len();

    let nearby: Vec<VehicleRecord> = vehicles
        .into_iter()
        .filter(VehicleRecord::is_available)
        .filter(|v| area.contains(v.position.lat(), v.position.lng()))
        .collect();

    debug!(
        center = %center,
        radius_km,
        total,
        nearby = nearby.len(),
        "Nearby vehicle search"
    );

    Ok(nearby)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleStatus;
    use crate::store::stub::{StubStore, vehicle};

    fn mexico() -> LatLng {
        LatLng::new(8.989022, 38.79036).unwrap()
    }

    #[test]
    fn box_dimensions() {
        let center = LatLng::new(10.0, 38.0).unwrap();
        let area = BoundingBox::around(center, 2.22);

        assert!((area.max_lat - 10.02).abs() < 1e-9);
        assert!((area.min_lat - 9.98).abs() < 1e-9);
        assert!((area.max_lng - 38.002).abs() < 1e-9);
        assert!((area.min_lng - 37.998).abs() < 1e-9);
    }

    #[test]
    fn equator_box_spans_every_longitude() {
        let center = LatLng::new(0.0, 10.0).unwrap();
        let area = BoundingBox::around(center, 1.0);

        assert!(area.min_lng.is_infinite());
        assert!(area.contains(0.0, -179.9));
        assert!(area.contains(0.0, 179.9));
        assert!(!area.contains(0.5, 10.0));
    }

    #[test]
    fn corners_are_included() {
        let center = LatLng::new(10.0, 38.0).unwrap();
        let area = BoundingBox::around(center, 1.0);
        assert!(area.contains(area.max_lat, area.max_lng));
        assert!(area.contains(area.min_lat, area.min_lng));
    }

    #[tokio::test]
    async fn filters_by_status_and_box() {
        let store = StubStore::new()
            .with_vehicle(vehicle("near", 8.99, 38.79, VehicleStatus::Available))
            .with_vehicle(vehicle("busy", 8.99, 38.79, VehicleStatus::Busy))
            .with_vehicle(vehicle("far", 9.10, 38.79, VehicleStatus::Available))
            .with_vehicle(vehicle("edge", 8.989022 + 0.018, 38.79036, VehicleStatus::Available));

        let found = find_available(&store, mexico(), 2.0).await.unwrap();
        let ids: Vec<_> = found.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "edge"]);
    }

    #[tokio::test]
    async fn propagates_store_errors() {
        let store = StubStore::new().failing_vehicles();
        let result = find_available(&store, mexico(), 2.0).await;
        assert!(matches!(result, Err(StoreError::Query { .. })));
    }
}
