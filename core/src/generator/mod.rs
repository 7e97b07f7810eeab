use crate::*;
pub use random::*;

mod random;

/// Strategy used to lay out mines on a fresh board.
pub trait BoardGenerator {
    /// Builds a fully initialized grid, with adjacency counts filled in.
    ///
    /// The grid must have the side and mine count of `config`.
    fn generate(self, config: GameConfig) -> Grid;
}
