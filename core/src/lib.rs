#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod game;
mod generator;
mod types;

/// Board dimensions and mine count for a fresh game.
///
/// The engine requires `mines < rows * cols`: at least one safe cell must
/// exist, both for the adjacency counts to mean anything and for a win to be
/// reachable.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Clamps the inputs into a valid configuration instead of rejecting them.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let max_mines = mult(rows, cols) - 1;
        if mines > max_mines {
            log::warn!("requested {} mines, clamped to {}", mines, max_mines);
        }
        Self::new_unchecked(rows, cols, mines.min(max_mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// Rejects configurations that would make mine placement loop forever.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of a reveal, including everything uncovered by its cascade.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// The loss signal: whether a mine was uncovered anywhere in the operation.
    pub const fn hit_mine(self) -> bool {
        matches!(self, Self::HitMine)
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Revealed, _) | (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
