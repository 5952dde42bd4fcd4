pub mod bounds;
pub mod codec;
pub mod constants;
mod symbols;

pub use bounds::BoundingBox;
pub use codec::{decode, decode_bounds, encode, encode_symbols, format_code, strip_separators};
pub use constants::{
    CODE_LENGTH, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON, OUTPUT_PRECISION, SEPARATOR, SYMBOL_GRID,
};
pub use symbols::{is_symbol, position_of, symbol_at};
