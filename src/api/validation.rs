use crate::error::Field;
use crate::index::constants::{ALPHABET_DESCRIPTION, CODE_LENGTH};
use crate::index::{BoundingBox, is_symbol, strip_separators};

/// A raw request value before validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Input<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
    /// Present but neither a string nor a number (booleans, arrays, objects)
    Other,
}

/// Checks a latitude or longitude and returns its value.
///
/// The first failing check wins: presence, emptiness, numeric form, range.
pub(crate) fn validate_coordinate(field: Field, input: Input<'_>) -> Result<f64, String> {
    let label = field.label();
    let value = match input {
        Input::Missing => return Err(format!("{} is required", label)),
        Input::Text("") => return Err(format!("{} cannot be empty", label)),
        Input::Text(text) => text.parse::<f64>().ok().filter(|v| v.is_finite()),
        Input::Number(n) => Some(n).filter(|v| v.is_finite()),
        Input::Other => None,
    };
    let value = value.ok_or_else(|| format!("{} must be a valid number", label))?;

    let region = BoundingBox::REGION;
    let in_range = match field {
        Field::Latitude => region.check_latitude(value),
        Field::Longitude => region.check_longitude(value),
    };
    in_range.map(|_| value).map_err(|_| {
        let (min, max) = match field {
            Field::Latitude => (region.min_lat, region.max_lat),
            Field::Longitude => (region.min_lon, region.max_lon),
        };
        format!("{} must be between {} and {}", label, min, max)
    })
}

/// Checks the shape of a DIGIPIN and returns it trimmed.
pub(crate) fn validate_code(input: Input<'_>) -> Result<String, String> {
    let code = match input {
        Input::Missing => return Err("DIGIPIN is required".to_string()),
        Input::Text("") => return Err("DIGIPIN cannot be empty".to_string()),
        Input::Text(text) => text.trim(),
        Input::Number(_) | Input::Other => return Err("DIGIPIN must be a string".to_string()),
    };

    let stripped = strip_separators(code);
    if stripped.chars().count() != CODE_LENGTH {
        return Err(format!(
            "DIGIPIN must be {} characters long (excluding hyphens)",
            CODE_LENGTH
        ));
    }
    if !stripped.chars().all(is_symbol) {
        return Err(format!(
            "DIGIPIN contains invalid characters. Only {} are allowed",
            ALPHABET_DESCRIPTION
        ));
    }

    Ok(code.to_string())
}
