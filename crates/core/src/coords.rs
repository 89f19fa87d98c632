//! Grid cell coordinates.

use serde::{Deserialize, Serialize};

/// Position of one cell in the grid, 0-based.
///
/// Two coordinate pairs are equal iff both components match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoords {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
}

impl CellCoords {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellCoords {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_equality() {
        assert_eq!(CellCoords::new(3, 7), CellCoords::from((3, 7)));
        assert_ne!(CellCoords::new(3, 7), CellCoords::new(7, 3));
    }
}
