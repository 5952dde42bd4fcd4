//! # digipin-rs
//!
//! DIGIPIN splits a fixed box over India (2.5°N-38.5°N, 63.5°E-99.5°E) into a
//! 4x4 grid, ten levels deep, and names each of the smallest cells with a
//! 10-symbol code such as `4P3-JK8-52C9`. The final cells are under 4 metres
//! on a side.
//!
//! There are currently four main entry points.
//!
//! ### 1. `encode` / `decode` - The Codec
//!
//! ```
//! use digipin_rs::{decode, encode};
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let code = encode(28.622788, 77.213033)?;
//! assert_eq!(code, "39J-49L-L8T4");
//!
//! let center = decode(&code)?;
//! println!("{}, {}", center.latitude, center.longitude);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `DigipinCell` - Single Cell Operations
//!
//! ```
//! use digipin_rs::DigipinCell;
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let cell = DigipinCell::from_wgs84(&(77.5946, 12.9716))?;
//! println!("{}", cell.code);
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToDigipin` - CSV File Conversion
//!
//! ```no_run
//! use digipin_rs::{CsvDigipinConfig, CsvToDigipin, GeometryFormat};
//!
//! let config = CsvDigipinConfig::from_coords("Longitude", "Latitude")
//!     .exclude(vec!["Geo Point".into()])
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_digipin_csv("output.csv", &config).unwrap();
//! ```
//!
//! ### 4. `api` - Request Handling
//!
//! ```
//! use digipin_rs::api::{Method, handle};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let body = json!({ "latitude": 12.9716, "longitude": 77.5946 });
//! let response = handle(Method::Post, "/api/digipin/encode", &HashMap::new(), Some(&body));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body["digipin"], "4P3-JK8-52C9");
//! ```

pub mod api;
pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;

pub use cell::DigipinCell;
pub use coord::{Coordinate, DecodedCoordinate};
pub use error::{DigipinError, Field};
pub use geom::{parse_geojson, parse_geometry, parse_wkt, polygon_to_geojson, polygon_to_wkt};
pub use index::{
    BoundingBox, CODE_LENGTH, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON, SYMBOL_GRID, decode,
    decode_bounds, encode, encode_symbols,
};
pub use io::{
    CoordinateSource, CsvDigipinConfig, CsvToDigipin, DigipinsToGeoJson, GeometryFormat,
    csv_to_digipin_csv,
};

pub use geo_types;
