use serde::{Deserialize, Serialize};

use crate::types::{Coord, Coord2};

/// One grid position with mine, reveal, flag, and adjacency state.
///
/// `row` and `col` are redundant with the cell's position in the grid and are
/// kept for standalone reference. `is_revealed` is monotonic: once set it
/// stays set until the whole board is replaced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: Coord,
    pub col: Coord,
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines among the up-to-8 adjacent cells, derived once at generation.
    pub neighbor_mines: u8,
}

impl Cell {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self {
            row,
            col,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            neighbor_mines: 0,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    /// Neither revealed nor flagged, so a reveal would change it.
    pub const fn is_untouched(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}
