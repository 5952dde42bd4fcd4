use crate::error::DigipinError;
use crate::index::constants::OUTPUT_PRECISION;
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Trait for types that can provide x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples and `geo_types::Point<f64>`.
/// This allows functions to accept either type. As with GeoJSON, x is the
/// longitude and y the latitude.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

/// A decoded DIGIPIN centre, rendered to six decimal places.
///
/// Serializes as `{"latitude": "...", "longitude": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCoordinate {
    pub latitude: String,
    pub longitude: String,
}

impl DecodedCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: format!("{:.*}", OUTPUT_PRECISION, latitude),
            longitude: format!("{:.*}", OUTPUT_PRECISION, longitude),
        }
    }

    /// Parses the rendered values back into `(latitude, longitude)`.
    pub fn to_f64(&self) -> Result<(f64, f64), DigipinError> {
        let lat = self.latitude.parse::<f64>().map_err(|e| {
            DigipinError::InvalidNumber(format!("latitude '{}': {}", self.latitude, e))
        })?;
        let lon = self.longitude.parse::<f64>().map_err(|e| {
            DigipinError::InvalidNumber(format!("longitude '{}': {}", self.longitude, e))
        })?;
        Ok((lat, lon))
    }
}
