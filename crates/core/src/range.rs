//! Rectangular cell ranges.

use serde::{Deserialize, Serialize};

use crate::coords::CellCoords;

/// A rectangular range of cells, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl CellRange {
    /// Create a new range, automatically normalizing so start <= end.
    pub fn new(a: CellCoords, b: CellCoords) -> Self {
        Self {
            start_row: a.row.min(b.row),
            start_col: a.col.min(b.col),
            end_row: a.row.max(b.row),
            end_col: a.col.max(b.col),
        }
    }

    /// Create a single-cell range.
    pub fn single(coords: CellCoords) -> Self {
        Self {
            start_row: coords.row,
            start_col: coords.col,
            end_row: coords.row,
            end_col: coords.col,
        }
    }

    /// Check if this range contains a cell.
    pub fn contains(&self, coords: CellCoords) -> bool {
        coords.row >= self.start_row && coords.row <= self.end_row &&
        coords.col >= self.start_col && coords.col <= self.end_col
    }

    /// Number of cells in this range.
    pub fn cell_count(&self) -> usize {
        (self.end_row - self.start_row + 1) * (self.end_col - self.start_col + 1)
    }

    /// Iterate over all cells in this range (row-major order).
    pub fn cells(&self) -> impl Iterator<Item = CellCoords> {
        let start_row = self.start_row;
        let end_row = self.end_row;
        let start_col = self.start_col;
        let end_col = self.end_col;

        (start_row..=end_row).flat_map(move |r| {
            (start_col..=end_col).map(move |c| CellCoords::new(r, c))
        })
    }

    /// Check if this is a single cell.
    pub fn is_single(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }
}
