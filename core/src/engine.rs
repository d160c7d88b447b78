use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::*;

impl Board {
    /// Reveals one cell, cascading through connected zero-adjacency regions.
    ///
    /// Flagged and already-revealed targets are left untouched, including
    /// when reached mid-cascade. The returned outcome carries the loss signal
    /// for everything uncovered by the call.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        Ok(self.reveal_cell(coords))
    }

    pub(crate) fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self[coords];
        if !cell.is_untouched() {
            return RevealOutcome::NoChange;
        }

        self[coords].is_revealed = true;
        if cell.is_mine {
            return RevealOutcome::HitMine;
        }
        if cell.neighbor_mines > 0 {
            return RevealOutcome::Revealed;
        }

        // Explicit worklist instead of recursion, so a large zero-region
        // cannot overflow the stack.
        let mut outcome = RevealOutcome::Revealed;
        let mut visited: HashSet<Coord2> = HashSet::new();
        visited.insert(coords);
        let mut to_visit: VecDeque<Coord2> = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].is_untouched())
            .collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let visit_cell = self[visit_coords];
            if !visit_cell.is_untouched() {
                continue;
            }

            self[visit_coords].is_revealed = true;

            if visit_cell.is_mine {
                // Cannot happen when adjacency counts are consistent with the
                // mine mask; still surfaced so the caller sees the loss.
                outcome = outcome | RevealOutcome::HitMine;
                continue;
            }

            if visit_cell.neighbor_mines == 0 {
                to_visit.extend(
                    self.iter_neighbors(visit_coords)
                        .filter(|&pos| self[pos].is_untouched())
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        outcome
    }

    /// Chording-style inference: wherever a revealed clue already has as many
    /// flagged neighbors as `neighbor_mines`, its remaining hidden neighbors
    /// are provably safe and get revealed. Repeats until a full scan yields
    /// nothing new.
    ///
    /// A wrong flag breaks the "provably" part: the moment an inferred cell
    /// turns out to be a mine, the scan stops and reports the hit.
    pub fn auto_reveal_safe_cells(&mut self) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;

        loop {
            let safe_cells = self.find_safe_cells();
            if safe_cells.is_empty() {
                return outcome;
            }

            for coords in safe_cells {
                let revealed = self.reveal_cell(coords);
                if revealed.hit_mine() {
                    return RevealOutcome::HitMine;
                }
                outcome = outcome | revealed;
            }
        }
    }

    /// One inference pass: hidden, unflagged neighbors of satisfied clues,
    /// deduplicated across clues.
    fn find_safe_cells(&self) -> Vec<Coord2> {
        let mut seen: HashSet<Coord2> = HashSet::new();
        let mut safe_cells = Vec::new();

        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let clue = self[(row, col)];
                if !clue.is_revealed || clue.is_mine || clue.neighbor_mines == 0 {
                    continue;
                }
                if self.count_flagged_neighbors((row, col)) != clue.neighbor_mines {
                    continue;
                }

                for pos in self.iter_neighbors((row, col)) {
                    if self[pos].is_untouched() && seen.insert(pos) {
                        safe_cells.push(pos);
                    }
                }
            }
        }

        safe_cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_marks_single_numbered_cell() {
        let mut board = Board::with_mines((3, 3), &[(1, 1)]).unwrap();

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert!(board[(0, 0)].is_revealed);
        // Numbered cell: no cascade into its neighbors.
        assert!(!board[(0, 1)].is_revealed);
        assert!(!board[(1, 0)].is_revealed);
    }

    #[test]
    fn reveal_mine_reports_hit() {
        let mut board = Board::with_mines((3, 3), &[(1, 1)]).unwrap();

        let outcome = board.reveal((1, 1)).unwrap();

        assert!(outcome.hit_mine());
        assert!(board[(1, 1)].is_revealed);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut board = Board::with_mines((3, 3), &[(1, 1)]).unwrap();
        board.reveal((0, 0)).unwrap();
        let snapshot = board.clone();

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::NoChange);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn reveal_never_touches_flagged_cells() {
        let mut board = Board::with_mines((3, 3), &[(1, 1)]).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::NoChange);
        assert!(!board[(0, 0)].is_revealed);
    }

    #[test]
    fn reveal_rejects_out_of_bounds() {
        let mut board = Board::with_mines((3, 3), &[]).unwrap();
        assert_eq!(board.reveal((3, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn flood_fill_opens_zero_region_up_to_the_numbered_border() {
        let mut board = Board::with_mines((5, 5), &[(0, 0), (4, 4)]).unwrap();

        let outcome = board.reveal((2, 2)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        for coords in [
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 1),
            (2, 3),
            (3, 1),
            (3, 2),
            (3, 3),
        ] {
            assert!(board[coords].is_revealed, "{:?} should be revealed", coords);
        }
        assert!(!board[(0, 0)].is_revealed);
        assert!(!board[(4, 4)].is_revealed);
    }

    #[test]
    fn flood_fill_flows_around_flags() {
        let mut board = Board::with_mines((5, 5), &[(0, 0), (4, 4)]).unwrap();
        board.toggle_flag((2, 3)).unwrap();

        board.reveal((2, 2)).unwrap();

        // The flagged cell stays hidden, the region behind it still opens.
        assert!(!board[(2, 3)].is_revealed);
        assert!(board[(2, 3)].is_flagged);
        assert!(board[(1, 3)].is_revealed);
        assert!(board[(3, 3)].is_revealed);
    }

    #[test]
    fn auto_reveal_opens_neighbors_of_satisfied_clue() {
        let mut board = Board::with_mines((3, 3), &[(1, 1)]).unwrap();
        board.reveal((0, 0)).unwrap();
        board.toggle_flag((1, 1)).unwrap();

        let outcome = board.auto_reveal_safe_cells();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert!(board[(0, 1)].is_revealed);
        assert!(board[(1, 0)].is_revealed);
        assert!(!board[(1, 1)].is_revealed);
    }

    #[test]
    fn auto_reveal_chains_to_a_fixed_point() {
        let mut board = Board::with_mines((3, 3), &[(1, 1)]).unwrap();
        board.reveal((0, 0)).unwrap();
        board.toggle_flag((1, 1)).unwrap();

        board.auto_reveal_safe_cells();

        // Each newly revealed clue licenses the next inference, so the whole
        // safe frontier falls in one call.
        assert!(board.check_win());
    }

    #[test]
    fn auto_reveal_detects_false_flag() {
        let mut board = Board::with_mines((3, 3), &[(1, 1)]).unwrap();
        board.reveal((0, 0)).unwrap();
        board.toggle_flag((0, 1)).unwrap();

        let outcome = board.auto_reveal_safe_cells();

        assert!(outcome.hit_mine());
        assert!(board[(1, 1)].is_revealed);
    }

    #[test]
    fn auto_reveal_terminates_with_nothing_to_infer() {
        let mut board = Board::with_mines((3, 3), &[(1, 1)]).unwrap();
        board.reveal((0, 0)).unwrap();

        // No flags placed: no clue is satisfied, a single scan must suffice.
        assert_eq!(board.auto_reveal_safe_cells(), RevealOutcome::NoChange);

        let untouched = Board::with_mines((4, 4), &[(0, 3), (3, 0)]).unwrap();
        let mut board = untouched.clone();
        assert_eq!(board.auto_reveal_safe_cells(), RevealOutcome::NoChange);
        assert_eq!(board, untouched);
    }
}
