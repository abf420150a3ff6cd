//! Domain types for the trip planner.
//!
//! Points and coordinates enforce their invariants at construction time,
//! so code that receives them can trust their validity.

mod error;
mod point;
mod vehicle;

pub use error::ErrorKind;
pub use point::{InvalidCoordinates, LatLng, NamedPoint};
pub use vehicle::{LocationType, VehicleRecord, VehicleStatus};
