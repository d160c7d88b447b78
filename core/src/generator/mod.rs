use crate::*;
pub use random::*;

mod random;

/// Strategy for producing a fully initialized board from a config.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}
