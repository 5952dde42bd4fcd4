use crate::coord::DecodedCoordinate;
use crate::error::DigipinError;
use crate::index::bounds::BoundingBox;
use crate::index::constants::{CODE_LENGTH, SEPARATOR, SEPARATOR_AFTER};
use crate::index::symbols::{position_of, symbol_at};

/// Encodes a latitude/longitude pair as a DIGIPIN in `XXX-XXX-XXXX` form.
///
/// The region is split into a 4x4 grid ten times over. At each level the
/// sub-cell containing the point contributes one symbol and becomes the cell
/// for the next level.
///
/// # Errors
///
/// [`DigipinError::OutOfRange`] if either value lies outside the DIGIPIN region.
/// Latitude is checked before longitude.
///
/// # Example
/// ```
/// use digipin_rs::encode;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// assert_eq!(encode(12.9716, 77.5946)?, "4P3-JK8-52C9");
/// # Ok(())
/// # }
/// ```
pub fn encode(latitude: f64, longitude: f64) -> Result<String, DigipinError> {
    let symbols = encode_symbols(latitude, longitude)?;
    Ok(format_code(&symbols))
}

/// Encodes a latitude/longitude pair without separators.
pub fn encode_symbols(latitude: f64, longitude: f64) -> Result<String, DigipinError> {
    let region = BoundingBox::REGION;
    region.check_latitude(latitude)?;
    region.check_longitude(longitude)?;

    let mut symbols = String::with_capacity(CODE_LENGTH);
    let mut cell = region;
    for _ in 0..CODE_LENGTH {
        let (row, col) = cell.sub_cell_of(latitude, longitude);
        symbols.push(symbol_at(row, col));
        cell = cell.sub_cell(row, col);
    }

    Ok(symbols)
}

/// Decodes a DIGIPIN to the centre of its cell.
///
/// Separators are optional. Coordinates are rendered with six decimal places.
///
/// # Errors
///
/// [`DigipinError::InvalidLength`] unless exactly 10 symbols remain after
/// removing separators, then [`DigipinError::InvalidSymbol`] for the first
/// character outside the alphabet.
///
/// # Example
/// ```
/// use digipin_rs::decode;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let coords = decode("4P3-JK8-52C9")?;
/// println!("{}, {}", coords.latitude, coords.longitude);
/// # Ok(())
/// # }
/// ```
pub fn decode(code: &str) -> Result<DecodedCoordinate, DigipinError> {
    let (latitude, longitude) = decode_bounds(code)?.centroid();
    Ok(DecodedCoordinate::new(latitude, longitude))
}

/// Decodes a DIGIPIN to the bounds of its final cell.
pub fn decode_bounds(code: &str) -> Result<BoundingBox, DigipinError> {
    let positions = parse_symbols(code)?;
    Ok(cell_for(&positions))
}

/// Walks the grid along a sequence of `(row, col)` positions.
pub(crate) fn cell_for(positions: &[(usize, usize)]) -> BoundingBox {
    positions
        .iter()
        .fold(BoundingBox::REGION, |cell, &(row, col)| cell.sub_cell(row, col))
}

/// Validates a code and returns the grid position of each symbol.
pub(crate) fn parse_symbols(code: &str) -> Result<Vec<(usize, usize)>, DigipinError> {
    let stripped = strip_separators(code);

    let len = stripped.chars().count();
    if len != CODE_LENGTH {
        return Err(DigipinError::InvalidLength(len));
    }

    stripped
        .chars()
        .map(|c| position_of(c).ok_or(DigipinError::InvalidSymbol(c)))
        .collect()
}

/// Removes surrounding whitespace and every separator from a code.
pub fn strip_separators(code: &str) -> String {
    code.trim().chars().filter(|&c| c != SEPARATOR).collect()
}

/// Inserts separators after the 3rd and 6th symbol.
pub fn format_code(symbols: &str) -> String {
    let mut out = String::with_capacity(symbols.len() + SEPARATOR_AFTER.len());
    for (i, c) in symbols.chars().enumerate() {
        out.push(c);
        if SEPARATOR_AFTER.contains(&i) {
            out.push(SEPARATOR);
        }
    }
    out
}
