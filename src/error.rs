use std::fmt;

/// Which half of a coordinate failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Latitude,
    Longitude,
}

impl Field {
    /// Capitalised name used at the start of user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Latitude => "Latitude",
            Field::Longitude => "Longitude",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for digipin-rs operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DigipinError {
    /// A latitude or longitude lies outside the DIGIPIN bounding box.
    #[error("{label} out of range ({min} to {max})", label = .field.label())]
    OutOfRange { field: Field, min: f64, max: f64 },
    /// The code does not hold exactly 10 symbols once separators are removed.
    #[error("Invalid DIGIPIN: expected 10 symbols, found {0}")]
    InvalidLength(usize),
    /// The code contains a character outside the 16-symbol alphabet.
    #[error("Invalid character in DIGIPIN: '{0}'")]
    InvalidSymbol(char),
    /// A subdivision level outside 1-10 was requested.
    #[error("Invalid level: {0}")]
    InvalidLevel(u8),
    /// A value could not be parsed as a number.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
    /// CSV parsing or reading error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// File I/O or serialization error.
    #[error("IO error: {0}")]
    IoError(String),
}
