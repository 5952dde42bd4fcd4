use crate::coord::{Coordinate, DecodedCoordinate};
use crate::error::DigipinError;
use crate::index::codec::{cell_for, parse_symbols};
use crate::index::{
    BoundingBox, CODE_LENGTH, encode_symbols, format_code, strip_separators, symbol_at,
};
use geo::Centroid;
use geo_types::{Geometry, LineString, Point, Polygon, Rect};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A single DIGIPIN cell.
///
/// Each `DigipinCell` is one of the ~1.1 trillion smallest cells of the DIGIPIN
/// grid, identified by its 10-symbol code. Coordinates follow the GeoJSON
/// convention: x is longitude, y is latitude.
///
/// # Example
///
/// ```
/// use digipin_rs::DigipinCell;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let cell = DigipinCell::from_lat_lon(12.9716, 77.5946)?;
/// assert_eq!(cell.code, "4P3-JK8-52C9");
/// println!("Center: ({}, {})", cell.latitude(), cell.longitude());
///
/// // Convert the cell to a polygon for GIS operations
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DigipinCell {
    /// Code in display form, `XXX-XXX-XXXX`
    pub code: String,
    /// Centre of the cell (x = longitude, y = latitude)
    pub center: Point<f64>,
    /// Extent of the cell (x = longitude, y = latitude)
    pub bounds: Rect<f64>,
}

impl DigipinCell {
    fn from_positions(positions: &[(usize, usize)]) -> Self {
        let symbols: String = positions
            .iter()
            .map(|&(row, col)| symbol_at(row, col))
            .collect();
        let cell = cell_for(positions);

        Self {
            code: format_code(&symbols),
            center: cell.center_point(),
            bounds: cell.to_rect(),
        }
    }

    /// Create a DigipinCell from a code, with or without separators.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::DigipinCell;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// let cell = DigipinCell::from_code("4P3JK852C9")?;
    /// assert_eq!(cell.code, "4P3-JK8-52C9");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_code(code: &str) -> Result<Self, DigipinError> {
        let positions = parse_symbols(code)?;
        Ok(Self::from_positions(&positions))
    }

    /// Create a DigipinCell from a latitude and longitude.
    pub fn from_lat_lon(latitude: f64, longitude: f64) -> Result<Self, DigipinError> {
        let symbols = encode_symbols(latitude, longitude)?;
        Self::from_code(&symbols)
    }

    /// Create a DigipinCell from WGS84 (lon/lat) coordinates
    ///
    /// # Example
    /// ```
    /// use digipin_rs::DigipinCell;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// // From tuple
    /// let cell = DigipinCell::from_wgs84(&(77.213033, 28.622788))?;
    /// // From Point
    /// let same = DigipinCell::from_wgs84(&Point::new(77.213033, 28.622788))?;
    /// assert_eq!(cell.code, same.code);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_wgs84(coord: &impl Coordinate) -> Result<Self, DigipinError> {
        Self::from_lat_lon(coord.y(), coord.x())
    }

    /// Create DigipinCells along a LineString in WGS84 coordinates.
    ///
    /// Samples the line at half the size of the smallest cell and returns every
    /// distinct cell it passes through, in the order first visited.
    pub fn from_line_string(line: &LineString) -> Result<Vec<Self>, DigipinError> {
        let (cell_height, cell_width) = final_cell_size();
        let step_size = cell_height.min(cell_width) * 0.5;

        let mut seen: HashSet<String> = HashSet::new();
        let mut cells: Vec<DigipinCell> = Vec::new();

        for window in line.0.windows(2) {
            let start = &window[0];
            let end = &window[1];

            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let segment_length = (dx * dx + dy * dy).sqrt();
            let steps = (segment_length / step_size).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                let symbols = encode_symbols(start.y + t * dy, start.x + t * dx)?;

                if seen.insert(symbols.clone()) {
                    cells.push(Self::from_code(&symbols)?);
                }
            }
        }

        // A single-vertex line still names one cell
        if line.0.len() == 1 {
            let only = line.0[0];
            cells.push(Self::from_lat_lon(only.y, only.x)?);
        }

        Ok(cells)
    }

    /// Create DigipinCells from an arbitrary `geo_types::Geometry` in WGS84.
    ///
    /// Points and polygon centroids produce a single cell; lines and
    /// collections may produce many.
    pub fn from_geometry(geom: Geometry<f64>) -> Result<Vec<Self>, DigipinError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_wgs84(&pt)?]),
            Geometry::LineString(line) => Self::from_line_string(&line),
            Geometry::MultiLineString(mls) => {
                let mut all_cells = Vec::new();
                for line in mls.0 {
                    all_cells.extend(Self::from_line_string(&line)?);
                }
                Ok(all_cells)
            }
            Geometry::Polygon(poly) => match poly.centroid() {
                Some(centroid) => Ok(vec![Self::from_wgs84(&centroid)?]),
                None => Ok(vec![]),
            },
            Geometry::MultiPolygon(mp) => {
                let mut cells = Vec::new();
                for poly in mp.0 {
                    if let Some(centroid) = poly.centroid() {
                        cells.push(Self::from_wgs84(&centroid)?);
                    }
                }
                Ok(cells)
            }
            Geometry::MultiPoint(mp) => mp.0.iter().map(Self::from_wgs84).collect(),
            Geometry::GeometryCollection(gc) => {
                let mut all_cells = Vec::new();
                for g in gc.0 {
                    all_cells.extend(Self::from_geometry(g)?);
                }
                Ok(all_cells)
            }
            _ => Err(DigipinError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    /// Returns the latitude of the cell centre.
    pub fn latitude(&self) -> f64 {
        self.center.y()
    }

    /// Returns the longitude of the cell centre.
    pub fn longitude(&self) -> f64 {
        self.center.x()
    }

    /// Returns the code without separators.
    pub fn symbols(&self) -> String {
        strip_separators(&self.code)
    }

    /// Returns the centre rendered to six decimal places.
    pub fn to_decoded(&self) -> DecodedCoordinate {
        DecodedCoordinate::new(self.latitude(), self.longitude())
    }

    /// Converts this cell to a rectangular polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    /// Returns the first `level` symbols, which address the enclosing cell at
    /// that level of subdivision.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::DigipinCell;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// let cell = DigipinCell::from_code("4P3-JK8-52C9")?;
    /// assert_eq!(cell.parent(3)?, "4P3");
    /// # Ok(())
    /// # }
    /// ```
    pub fn parent(&self, level: u8) -> Result<String, DigipinError> {
        check_level(level)?;
        Ok(self.symbols().chars().take(level as usize).collect())
    }

    /// Returns the bounds of the enclosing cell at `level` (1-10).
    pub fn cell_bounds_at(&self, level: u8) -> Result<BoundingBox, DigipinError> {
        check_level(level)?;
        let positions = parse_symbols(&self.code)?;
        Ok(cell_for(&positions[..level as usize]))
    }
}

impl fmt::Display for DigipinCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for DigipinCell {
    type Err = DigipinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

fn check_level(level: u8) -> Result<(), DigipinError> {
    if level == 0 || level as usize > CODE_LENGTH {
        return Err(DigipinError::InvalidLevel(level));
    }
    Ok(())
}

/// Height and width, in degrees, of the smallest cell.
fn final_cell_size() -> (f64, f64) {
    let divisions = 4f64.powi(CODE_LENGTH as i32);
    let region = BoundingBox::REGION;
    (region.height() / divisions, region.width() / divisions)
}
