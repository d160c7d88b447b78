use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Row-major grid of cells plus the fixed number of mines placed in it.
///
/// The grid is the whole of the game state: operations mutate it in place and
/// a reset is a wholesale replacement with a freshly generated board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) cells: Array2<Cell>,
    pub(crate) mines: CellCount,
}

impl Board {
    /// Allocates an all-hidden, mine-free grid with `row`/`col` stamped on
    /// every cell.
    pub(crate) fn blank(rows: Coord, cols: Coord) -> Self {
        let cells = Array2::from_shape_fn((rows as usize, cols as usize), |(row, col)| {
            Cell::new(row as Coord, col as Coord)
        });
        Self { cells, mines: 0 }
    }

    /// Builds a board with mines at explicit coordinates, deriving every
    /// cell's adjacency count from the finished layout. Duplicate coordinates
    /// count once.
    pub fn with_mines((rows, cols): Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut board = Self::blank(rows, cols);
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            if !board[coords].is_mine {
                board[coords].is_mine = true;
                board.mines += 1;
            }
        }
        board.derive_neighbor_counts();
        Ok(board)
    }

    /// Recomputes `neighbor_mines` for every cell, mine cells included, from
    /// the final mine mask.
    pub(crate) fn derive_neighbor_counts(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let count = self
                    .cells
                    .iter_neighbor_cells((row, col))
                    .filter(|cell: &Cell| cell.is_mine)
                    .count()
                    .try_into()
                    .unwrap();
                self.cells[(row, col).to_nd_index()].neighbor_mines = count;
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The clipped Moore neighborhood of a cell, as index pairs into the
    /// grid. Pure read; 3, 5, or 8 entries in unspecified order.
    pub fn neighbors(&self, coords: Coord2) -> SmallVec<[Coord2; 8]> {
        self.cells.neighbors(coords)
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub(crate) fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbor_cells(coords)
            .filter(|cell: &Cell| cell.is_flagged)
            .count()
            .try_into()
            .unwrap()
    }

    /// Flips the flag on an unrevealed cell. Flagging a revealed cell is a
    /// no-op: a cell is never both flagged and revealed.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        Ok(if self[coords].is_revealed {
            MarkOutcome::NoChange
        } else {
            self[coords].is_flagged = !self[coords].is_flagged;
            MarkOutcome::Changed
        })
    }

    /// Reveal-complete win condition: every non-mine cell is revealed. Flag
    /// placement is irrelevant, and mines may stay hidden.
    pub fn check_win(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_mine || cell.is_revealed)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.cells[(row as usize, col as usize)]
    }
}
