pub mod csv;
pub mod geojson;

pub use self::csv::{
    CoordinateSource, CsvDigipinConfig, CsvToDigipin, GeometryFormat, csv_to_digipin_csv,
};
pub use self::geojson::DigipinsToGeoJson;
