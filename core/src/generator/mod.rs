use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Produces the grid for a new round: endpoints placed, obstacles set, no
/// player marks.
pub trait GridGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<Grid>;
}
