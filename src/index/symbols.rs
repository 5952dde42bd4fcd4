use crate::index::constants::SYMBOL_GRID;

const NO_SYMBOL: u8 = u8::MAX;

/// Reverse of [`SYMBOL_GRID`], indexed by ASCII byte. Each entry packs
/// `row * 4 + col`, or `NO_SYMBOL` for bytes outside the alphabet.
static POSITIONS: [u8; 128] = build_positions();

const fn build_positions() -> [u8; 128] {
    let mut table = [NO_SYMBOL; 128];
    let mut row = 0;
    while row < 4 {
        let mut col = 0;
        while col < 4 {
            table[SYMBOL_GRID[row][col] as usize] = (row * 4 + col) as u8;
            col += 1;
        }
        row += 1;
    }
    table
}

/// Returns the symbol labelling sub-cell `(row, col)`.
///
/// Both indices must be in `0..4`.
pub fn symbol_at(row: usize, col: usize) -> char {
    SYMBOL_GRID[row][col] as char
}

/// Looks up the `(row, col)` of a symbol, or `None` if it is not in the alphabet.
pub fn position_of(symbol: char) -> Option<(usize, usize)> {
    if !symbol.is_ascii() {
        return None;
    }
    match POSITIONS[symbol as usize] {
        NO_SYMBOL => None,
        packed => Some(((packed / 4) as usize, (packed % 4) as usize)),
    }
}

/// Returns `true` if `symbol` is one of the 16 DIGIPIN characters.
pub fn is_symbol(symbol: char) -> bool {
    position_of(symbol).is_some()
}
