//! Geographic point types.

use std::fmt;

use serde::Serialize;

use super::error::ErrorKind;

/// Error returned when building a point from invalid input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidCoordinates {
    /// Latitude outside [-90, 90] or not finite
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    /// Longitude outside [-180, 180] or not finite
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),

    /// Name is empty after trimming
    #[error("location name must not be empty")]
    EmptyName,
}

impl InvalidCoordinates {
    /// Malformed coordinates are always rejected before any I/O.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

/// A latitude/longitude pair in decimal degrees.
///
/// Both components are finite and inside their valid ranges. This type
/// guarantees that any `LatLng` value is valid by construction.
///
/// # Examples
///
/// ```
/// use fermata_server::domain::LatLng;
///
/// let mexico = LatLng::new(8.989022, 38.79036).unwrap();
/// assert_eq!(mexico.lat(), 8.989022);
///
/// assert!(LatLng::new(91.0, 0.0).is_err());
/// assert!(LatLng::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Validate and build a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates::Latitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinates::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Build from a table constant known to be in range.
    pub(crate) const fn from_static(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A resolved place: a display name plus its coordinates.
///
/// Serialises as `{"name": .., "lat": .., "lng": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedPoint {
    name: String,
    #[serde(flatten)]
    position: LatLng,
}

impl NamedPoint {
    /// Validate and build a named point.
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Result<Self, InvalidCoordinates> {
        let position = LatLng::new(lat, lng)?;
        Self::at(name, position)
    }

    /// Build a named point at an already validated position.
    pub fn at(name: impl Into<String>, position: LatLng) -> Result<Self, InvalidCoordinates> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidCoordinates::EmptyName);
        }
        Ok(Self { name, position })
    }

    pub(crate) fn from_static(name: &str, lat: f64, lng: f64) -> Self {
        Self {
            name: name.to_string(),
            position: LatLng::from_static(lat, lng),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn latitude(&self) -> f64 {
        self.position.lat
    }

    pub fn longitude(&self) -> f64 {
        self.position.lng
    }
}
