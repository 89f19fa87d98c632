//! Cell identity for render keys and imperative lookups.
//!
//! A `CellId` is derived deterministically from coordinates and renders as an
//! Excel-style reference (`A1`, `AB12`). The rendering is injective over the
//! coordinate space, so it is safe to use as a DOM/render key and as the
//! matching key for element lookups.

use crate::coords::CellCoords;

/// Unique identifier for a cell in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellId {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
}

impl CellId {
    /// Create a new CellId.
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Coordinates this identity was derived from.
    #[inline]
    pub fn coords(&self) -> CellCoords {
        CellCoords::new(self.row, self.col)
    }
}

impl From<CellCoords> for CellId {
    fn from(coords: CellCoords) -> Self {
        Self { row: coords.row, col: coords.col }
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Convert column to letter(s): 0=A, 1=B, ..., 25=Z, 26=AA, etc.
        let col_str = col_to_letters(self.col);
        write!(f, "{}{}", col_str, self.row + 1)
    }
}

/// Convert 0-based column index to Excel-style letter(s).
pub fn col_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}
