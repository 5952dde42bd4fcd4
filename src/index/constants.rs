/// Southern limit of the DIGIPIN region (degrees latitude)
pub const MIN_LAT: f64 = 2.5;

/// Northern limit of the DIGIPIN region (degrees latitude)
pub const MAX_LAT: f64 = 38.5;

/// Western limit of the DIGIPIN region (degrees longitude)
pub const MIN_LON: f64 = 63.5;

/// Eastern limit of the DIGIPIN region (degrees longitude)
pub const MAX_LON: f64 = 99.5;

/// Number of symbols in a code, one per subdivision level
pub const CODE_LENGTH: usize = 10;

/// Cosmetic separator inserted into displayed codes
pub const SEPARATOR: char = '-';

/// A separator follows the symbols at these (zero-based) positions
pub(crate) const SEPARATOR_AFTER: [usize; 2] = [2, 5];

/// Decimal places used when rendering decoded coordinates
pub const OUTPUT_PRECISION: usize = 6;

/// The 4x4 symbol grid. Row 0 is the northernmost band, column 0 the westernmost.
pub const SYMBOL_GRID: [[u8; 4]; 4] = [
    [b'F', b'C', b'9', b'8'],
    [b'J', b'3', b'2', b'7'],
    [b'K', b'4', b'5', b'6'],
    [b'L', b'M', b'P', b'T'],
];

/// Human-readable list of the alphabet, used in validation messages
pub const ALPHABET_DESCRIPTION: &str = "2-9, C, F, J, K, L, M, P, T";
