use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum GameStatus {
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One playthrough over a single board.
///
/// The board itself is a pure grid; this wrapper adds what a caller needs
/// around it: terminal-state gating, the reveal → inference → win-check
/// sequencing, and the flag tally. Restarting is wholesale replacement with a
/// fresh `GameState`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    status: GameStatus,
    flag_count: CellCount,
}

impl GameState {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            status: GameStatus::Ready,
            flag_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines minus placed flags; negative when the player overflags.
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flag_count as isize)
    }

    /// Reveals a cell, then lets the inference pass open whatever the current
    /// flags prove safe, then checks for the win.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        let outcome = self.board.reveal(coords)?;
        if outcome.hit_mine() {
            self.status = GameStatus::Lost;
            return Ok(outcome);
        }
        if outcome.has_update() {
            self.mark_started();
        }

        let inferred = self.board.auto_reveal_safe_cells();
        if inferred.hit_mine() {
            self.status = GameStatus::Lost;
        } else if self.board.check_win() {
            self.status = GameStatus::Won;
        }
        Ok(outcome | inferred)
    }

    /// Toggles a flag and keeps the tally. A changed flag can satisfy a clue,
    /// so the inference pass runs here too; a wrong flag can lose the game
    /// without any further reveal.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_not_finished()?;

        let outcome = self.board.toggle_flag(coords)?;
        if !outcome.has_update() {
            return Ok(outcome);
        }

        self.mark_started();
        if self.board.cell_at(coords).is_flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }

        let inferred = self.board.auto_reveal_safe_cells();
        if inferred.hit_mine() {
            self.status = GameStatus::Lost;
        } else if self.board.check_win() {
            self.status = GameStatus::Won;
        }
        Ok(outcome)
    }

    fn mark_started(&mut self) {
        if matches!(self.status, GameStatus::Ready) {
            self.status = GameStatus::Active;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
