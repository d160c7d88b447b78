use super::*;

/// Uniform rejection-sampling placement: draws `(row, col)` pairs with
/// replacement until the requested number of distinct cells is mined, then
/// derives every cell's adjacency count from the finished mask.
///
/// Expected time is fine for boards up to a few thousand cells but degrades
/// as `mines` approaches the cell count; `GameConfig::validate` rules out the
/// saturated case before the loop runs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        use rand::prelude::*;

        config.validate()?;

        let mut board = Board::blank(config.rows, config.cols);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;

        while mines_placed < config.mines {
            let coords = (
                rng.random_range(0..config.rows),
                rng.random_range(0..config.cols),
            );
            if !board[coords].is_mine {
                board[coords].is_mine = true;
                mines_placed += 1;
            }
        }

        board.mines = mines_placed;
        board.derive_neighbor_counts();

        log::debug!(
            "generated {}x{} board with {} mines (seed {})",
            config.rows,
            config.cols,
            board.mines,
            self.seed
        );
        Ok(board)
    }
}
