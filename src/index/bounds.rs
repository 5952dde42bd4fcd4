use crate::error::{DigipinError, Field};
use crate::index::constants::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use geo_types::{Point, Rect, coord};

/// A latitude/longitude rectangle.
///
/// Used both for the fixed DIGIPIN region ([`BoundingBox::REGION`]) and for the
/// shrinking cell walked by the encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// The region in which every DIGIPIN is defined.
    pub const REGION: BoundingBox = BoundingBox {
        min_lat: MIN_LAT,
        max_lat: MAX_LAT,
        min_lon: MIN_LON,
        max_lon: MAX_LON,
    };

    /// Checks that `latitude` lies within the box, edges included.
    ///
    /// NaN is always rejected.
    pub fn check_latitude(&self, latitude: f64) -> Result<(), DigipinError> {
        if (self.min_lat..=self.max_lat).contains(&latitude) {
            Ok(())
        } else {
            Err(DigipinError::OutOfRange {
                field: Field::Latitude,
                min: self.min_lat,
                max: self.max_lat,
            })
        }
    }

    /// Checks that `longitude` lies within the box, edges included.
    pub fn check_longitude(&self, longitude: f64) -> Result<(), DigipinError> {
        if (self.min_lon..=self.max_lon).contains(&longitude) {
            Ok(())
        } else {
            Err(DigipinError::OutOfRange {
                field: Field::Longitude,
                min: self.min_lon,
                max: self.max_lon,
            })
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.check_latitude(latitude).is_ok() && self.check_longitude(longitude).is_ok()
    }

    fn lat_step(&self) -> f64 {
        (self.max_lat - self.min_lat) / 4.0
    }

    fn lon_step(&self) -> f64 {
        (self.max_lon - self.min_lon) / 4.0
    }

    /// Returns the `(row, col)` of the 4x4 sub-cell containing the point.
    ///
    /// Rows count down from the north edge. A point on the north or east edge
    /// would land in band 4, so both indices are clamped into `0..=3`.
    pub fn sub_cell_of(&self, latitude: f64, longitude: f64) -> (usize, usize) {
        let band = ((latitude - self.min_lat) / self.lat_step()).floor() as i64;
        let row = (3 - band).clamp(0, 3);
        let col = (((longitude - self.min_lon) / self.lon_step()).floor() as i64).clamp(0, 3);
        (row as usize, col as usize)
    }

    /// Narrows the box to sub-cell `(row, col)`.
    pub fn sub_cell(&self, row: usize, col: usize) -> BoundingBox {
        let lat_step = self.lat_step();
        let lon_step = self.lon_step();

        let max_lat = self.max_lat - row as f64 * lat_step;
        let min_lon = self.min_lon + col as f64 * lon_step;

        BoundingBox {
            min_lat: max_lat - lat_step,
            max_lat,
            min_lon,
            max_lon: min_lon + lon_step,
        }
    }

    /// Geometric centre as `(latitude, longitude)`.
    pub fn centroid(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Centre as a `Point` with x = longitude, y = latitude.
    pub fn center_point(&self) -> Point<f64> {
        let (lat, lon) = self.centroid();
        Point::new(lon, lat)
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Converts to a `geo_types::Rect` with x = longitude, y = latitude.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }
}
