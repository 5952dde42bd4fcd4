use crate::cell::DigipinCell;
use crate::error::DigipinError;
use crate::geom::{parse_geometry, polygon_to_geojson, polygon_to_wkt};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
    Code(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
    /// A column of DIGIPIN codes to decode
    CodeColumn(String),
}

#[derive(Debug, Clone)]
pub struct CsvDigipinConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub include_cell_geometry: Option<GeometryFormat>,
    pub skip_invalid: bool,
}

impl CsvDigipinConfig {
    fn with_source(source: CoordinateSource) -> Self {
        Self {
            source,
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            skip_invalid: false,
        }
    }

    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvDigipinConfig;
    ///
    /// let config = CsvDigipinConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::GeometryColumn(geometry_column.into()))
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvDigipinConfig;
    ///
    /// let config = CsvDigipinConfig::from_coords("Longitude", "Latitude");
    /// ```
    pub fn from_coords(lon_column: impl Into<String>, lat_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::CoordinateColumns {
            lon_column: lon_column.into(),
            lat_column: lat_column.into(),
        })
    }

    /// Create config for decoding a column of DIGIPIN codes.
    ///
    /// The output gains `latitude` and `longitude` columns.
    pub fn from_codes(code_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::CodeColumn(code_column.into()))
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Adds a `cell_geometry` column holding each cell's polygon.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    /// Log and drop rows the codec rejects instead of failing the whole file.
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

pub trait CsvToDigipin {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigipinConfig,
    ) -> Result<usize, DigipinError>;
}

impl<P: AsRef<Path>> CsvToDigipin for P {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigipinConfig,
    ) -> Result<usize, DigipinError> {
        csv_to_digipin_csv(self, output_path, config)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, kind: &str) -> Result<usize, DigipinError> {
    if name.is_empty() {
        return Err(DigipinError::CsvError(format!(
            "{} column name cannot be empty",
            kind
        )));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DigipinError::CsvError(format!("{} column '{}' not found", kind, name)))
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize, kind: &str) -> Result<&'a str, DigipinError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| DigipinError::CsvError(format!("Missing {} column at index {}", kind, idx)))
}

fn parse_number(value: &str, kind: &str) -> Result<f64, DigipinError> {
    value
        .parse()
        .map_err(|_| DigipinError::InvalidNumber(format!("{} '{}'", kind, value)))
}

/// Errors that belong to a single row rather than the file as a whole.
fn is_row_error(err: &DigipinError) -> bool {
    !matches!(err, DigipinError::CsvError(_) | DigipinError::IoError(_))
}

/// Converts a CSV file with geometry, coordinate or code columns to a CSV file
/// with DIGIPIN data. Returns the number of data rows written.
///
/// Streams output to minimize memory usage for large files. When encoding, each
/// output row starts with a `digipin` column (plus `cell_geometry` if
/// requested). When decoding, each row starts with `latitude` and `longitude`.
/// The source columns are dropped in both directions.
///
/// # Example with coordinate columns
///
/// ```no_run
/// use digipin_rs::{csv_to_digipin_csv, CsvDigipinConfig, GeometryFormat};
///
/// let config = CsvDigipinConfig::from_coords("Longitude", "Latitude")
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_digipin_csv("post_offices.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example decoding a code column
///
/// ```no_run
/// use digipin_rs::{CsvDigipinConfig, CsvToDigipin};
///
/// let config = CsvDigipinConfig::from_codes("DIGIPIN").skip_invalid(true);
/// "addresses.csv".to_digipin_csv("decoded.csv", &config).unwrap();
/// ```
pub fn csv_to_digipin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvDigipinConfig,
) -> Result<usize, DigipinError> {
    let csv_path = csv_path.as_ref();
    let file = File::open(csv_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DigipinError::CsvError(e.to_string()))?
        .clone();

    let mut exclude_indices = HashSet::new();
    let source_indices = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            exclude_indices.insert(idx);
            SourceIndices::Geometry(idx)
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = column_index(&headers, lon_column, "Longitude")?;
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            exclude_indices.insert(lon_idx);
            exclude_indices.insert(lat_idx);
            SourceIndices::Coordinates { lon_idx, lat_idx }
        }
        CoordinateSource::CodeColumn(col) => {
            let idx = column_index(&headers, col, "DIGIPIN")?;
            exclude_indices.insert(idx);
            SourceIndices::Code(idx)
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = match source_indices {
        SourceIndices::Code(_) => vec!["latitude", "longitude"],
        _ => vec!["digipin"],
    };
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| DigipinError::CsvError(e.to_string()))?;

    log::debug!("converting {} to DIGIPIN CSV", csv_path.display());

    let mut written = 0;
    let mut skipped = 0;

    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DigipinError::CsvError(e.to_string()))?;

        let cells = match &source_indices {
            SourceIndices::Geometry(idx) => field(&record, *idx, "geometry")
                .and_then(parse_geometry)
                .and_then(DigipinCell::from_geometry),
            SourceIndices::Coordinates { lon_idx, lat_idx } => {
                field(&record, *lon_idx, "longitude")
                    .and_then(|v| parse_number(v, "longitude"))
                    .and_then(|lon| {
                        let lat = parse_number(field(&record, *lat_idx, "latitude")?, "latitude")?;
                        DigipinCell::from_lat_lon(lat, lon)
                    })
                    .map(|cell| vec![cell])
            }
            SourceIndices::Code(idx) => field(&record, *idx, "DIGIPIN")
                .and_then(DigipinCell::from_code)
                .map(|cell| vec![cell]),
        };

        let cells = match cells {
            Ok(cells) => cells,
            Err(e) if config.skip_invalid && is_row_error(&e) => {
                // +2: one for the header, one for 1-based numbering
                log::warn!("skipping row {}: {}", line + 2, e);
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        for cell in cells {
            let mut row: Vec<String> = match source_indices {
                SourceIndices::Code(_) => {
                    let decoded = cell.to_decoded();
                    vec![decoded.latitude, decoded.longitude]
                }
                _ => vec![cell.code.clone()],
            };

            if let Some(format) = config.include_cell_geometry {
                let polygon = cell.to_polygon();
                let geom_str = match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                };
                row.push(geom_str);
            }

            for (i, value) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(value.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| DigipinError::CsvError(e.to_string()))?;
            written += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| DigipinError::CsvError(e.to_string()))?;

    log::debug!("wrote {} rows, skipped {}", written, skipped);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_input(path: &Path, lines: &[&str]) -> Result<(), DigipinError> {
        let mut file = File::create(path).map_err(|e| DigipinError::IoError(e.to_string()))?;
        for line in lines {
            writeln!(file, "{}", line).map_err(|e| DigipinError::IoError(e.to_string()))?;
        }
        Ok(())
    }

    fn read_output(path: &Path) -> Result<Vec<csv::StringRecord>, DigipinError> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|e| DigipinError::CsvError(e.to_string()))?;
        let mut rows = vec![
            reader
                .headers()
                .map_err(|e| DigipinError::CsvError(e.to_string()))?
                .clone(),
        ];
        for record in reader.records() {
            rows.push(record.map_err(|e| DigipinError::CsvError(e.to_string()))?);
        }
        Ok(rows)
    }

    #[test]
    fn test_csv_from_coords() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "ID,Longitude,Latitude,Description",
                "1,77.5946,12.9716,Bangalore",
                "2,77.213033,28.622788,Dak Bhawan",
            ],
        )?;

        let config = CsvDigipinConfig::from_coords("Longitude", "Latitude");
        let written = csv_to_digipin_csv(&csv_path, &output_path, &config)?;
        assert_eq!(written, 2);

        let rows = read_output(&output_path)?;
        assert_eq!(&rows[0], vec!["digipin", "ID", "Description"]);
        assert_eq!(&rows[1], vec!["4P3-JK8-52C9", "1", "Bangalore"]);
        assert_eq!(&rows[2], vec!["39J-49L-L8T4", "2", "Dak Bhawan"]);
        Ok(())
    }

    #[test]
    fn test_csv_geometry_column_with_cell_geometry() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "SITE,geometry,Geo Point",
                "GPO,\"POINT(77.5946 12.9716)\",ignored",
                "Dak Bhawan,\"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[77.213033,28.622788]}\",ignored",
            ],
        )?;

        let config = CsvDigipinConfig::new("geometry")
            .exclude(vec!["Geo Point".into()])
            .with_cell_geometry(GeometryFormat::Wkt);
        csv_to_digipin_csv(&csv_path, &output_path, &config)?;

        let rows = read_output(&output_path)?;
        assert_eq!(&rows[0], vec!["digipin", "cell_geometry", "SITE"]);
        assert_eq!(&rows[1][0], "4P3-JK8-52C9");
        assert!(rows[1][1].starts_with("POLYGON"));
        assert_eq!(&rows[2][0], "39J-49L-L8T4");
        assert_eq!(&rows[2][2], "Dak Bhawan");
        Ok(())
    }

    #[test]
    fn test_csv_decode_codes() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("codes.csv");
        let output_path = dir.path().join("decoded.csv");

        write_input(&csv_path, &["Name,DIGIPIN", "GPO,4P3-JK8-52C9", "Dak,39J49LL8T4"])?;

        let config = CsvDigipinConfig::from_codes("DIGIPIN");
        csv_path.to_digipin_csv(&output_path, &config)?;

        let rows = read_output(&output_path)?;
        assert_eq!(&rows[0], vec!["latitude", "longitude", "Name"]);
        let lat: f64 = rows[1][0].parse().map_err(|_| DigipinError::CsvError("lat".into()))?;
        let lon: f64 = rows[1][1].parse().map_err(|_| DigipinError::CsvError("lon".into()))?;
        assert!((lat - 12.9716).abs() < 5e-5);
        assert!((lon - 77.5946).abs() < 5e-5);
        assert_eq!(&rows[2][2], "Dak");
        Ok(())
    }

    #[test]
    fn test_csv_invalid_row_fails_by_default() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &["Longitude,Latitude", "77.5946,12.9716", "0.0,51.5"],
        )?;

        let config = CsvDigipinConfig::from_coords("Longitude", "Latitude");
        let result = csv_to_digipin_csv(&csv_path, &output_path, &config);
        assert!(matches!(result, Err(DigipinError::OutOfRange { .. })));
        Ok(())
    }

    #[test]
    fn test_csv_skip_invalid_rows() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("codes.csv");
        let output_path = dir.path().join("decoded.csv");

        write_input(
            &csv_path,
            &["DIGIPIN", "4P3-JK8-52C9", "4P3-JK8-52XY", "4P3", "39J-49L-L8T4"],
        )?;

        let config = CsvDigipinConfig::from_codes("DIGIPIN").skip_invalid(true);
        let written = csv_to_digipin_csv(&csv_path, &output_path, &config)?;
        assert_eq!(written, 2);

        let rows = read_output(&output_path)?;
        assert_eq!(rows.len(), 3);
        Ok(())
    }

    #[test]
    fn test_csv_missing_column() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["Lon,Lat", "77.5946,12.9716"])?;

        let config = CsvDigipinConfig::from_coords("Longitude", "Latitude");
        let result = csv_to_digipin_csv(&csv_path, &output_path, &config);
        assert!(matches!(result, Err(DigipinError::CsvError(msg)) if msg.contains("Longitude")));

        let config = CsvDigipinConfig::from_coords("", "Lat");
        assert!(csv_to_digipin_csv(&csv_path, &output_path, &config).is_err());
        Ok(())
    }
}
