//! The selection model: an anchor plus the active rectangular range.
//!
//! The anchor is the origin of the range and the default receiver of keyboard
//! focus. For a single-cell selection the anchor and the end coincide.

use crate::coords::CellCoords;
use crate::range::CellRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    anchor: CellCoords,
    end: CellCoords,
}

impl Selection {
    /// Create a new selection with a single cell.
    pub fn new(coords: CellCoords) -> Self {
        Self { anchor: coords, end: coords }
    }

    /// The anchor cell (origin for extending selections).
    pub fn anchor(&self) -> CellCoords {
        self.anchor
    }

    /// The end cell (opposite corner of the active range).
    pub fn end(&self) -> CellCoords {
        self.end
    }

    /// The active range, normalized to a rectangle.
    pub fn range(&self) -> CellRange {
        CellRange::new(self.anchor, self.end)
    }

    /// Check if a cell falls inside the active range.
    pub fn contains(&self, coords: CellCoords) -> bool {
        self.range().contains(coords)
    }

    /// Check if selection is a single cell.
    pub fn is_single_cell(&self) -> bool {
        self.anchor == self.end
    }

    /// Set selection to a single cell (click).
    pub fn select_cell(&mut self, coords: CellCoords) {
        self.anchor = coords;
        self.end = coords;
    }

    /// Extend the range from the anchor to the given cell (shift+click).
    pub fn extend_to(&mut self, coords: CellCoords) {
        self.end = coords;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_single() {
        let sel = Selection::new(CellCoords::new(2, 2));
        assert!(sel.is_single_cell());
        assert_eq!(sel.anchor(), sel.end());
        assert!(sel.contains(CellCoords::new(2, 2)));
        assert!(!sel.contains(CellCoords::new(2, 3)));
    }

    #[test]
    fn test_selection_extend() {
        let mut sel = Selection::new(CellCoords::new(2, 2));
        sel.extend_to(CellCoords::new(4, 5));

        assert_eq!(sel.anchor(), CellCoords::new(2, 2));
        assert!(sel.contains(CellCoords::new(2, 2)));
        assert!(sel.contains(CellCoords::new(3, 3)));
        assert!(sel.contains(CellCoords::new(4, 5)));
        assert!(!sel.contains(CellCoords::new(1, 1)));
    }

    #[test]
    fn test_extend_keeps_anchor() {
        let mut sel = Selection::new(CellCoords::new(3, 1));
        sel.extend_to(CellCoords::new(0, 1));
        assert_eq!(sel.anchor(), CellCoords::new(3, 1));
        assert_eq!(sel.range(), CellRange::new(CellCoords::new(0, 1), CellCoords::new(3, 1)));

        // Fresh select replaces anchor and end.
        sel.select_cell(CellCoords::new(7, 7));
        assert!(sel.is_single_cell());
        assert_eq!(sel.anchor(), CellCoords::new(7, 7));
    }
}
