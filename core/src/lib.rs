#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use adjacency::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use path::*;
pub use session::*;
pub use snapshot::*;
pub use solver::*;
pub use types::*;
pub use validator::*;

mod adjacency;
mod cell;
mod error;
mod generator;
mod grid;
mod path;
mod session;
mod snapshot;
mod solver;
mod types;
mod validator;

/// Round parameters, injected once when a session is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid dimensions as `(rows, cols)`.
    pub size: Coord2,
    /// Inclusive range the number of 2×2 obstacle blocks is drawn from.
    pub obstacles: (CellCount, CellCount),
    /// Reject obstacle blocks that would disconnect start from end.
    pub keep_route_open: bool,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, obstacles: (CellCount, CellCount)) -> Self {
        Self {
            size,
            obstacles,
            keep_route_open: true,
        }
    }

    /// Clamps the grid to at least 2×2 and the obstacle range to what fits.
    pub fn new((rows, cols): Coord2, (min, max): (CellCount, CellCount)) -> Self {
        let rows = rows.clamp(2, Coord::MAX);
        let cols = cols.clamp(2, Coord::MAX);
        let fit = max_blocks((rows, cols));
        let max = max.min(fit);
        let min = min.min(max);
        Self::new_unchecked((rows, cols), (min, max))
    }

    /// The original layout: 20×20 cells with 5 to 15 obstacle blocks.
    pub const fn classic() -> Self {
        Self::new_unchecked((20, 20), (5, 15))
    }

    pub const fn with_keep_route_open(self, keep_route_open: bool) -> Self {
        Self {
            keep_route_open,
            ..self
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.obstacles;
        if min > max {
            return Err(GameError::InvalidObstacleRange);
        }
        if self.total_cells() < 2 {
            return Err(GameError::GridTooSmall);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Upper bound on non-overlapping 2×2 blocks for a grid of `size`.
pub const fn max_blocks(size: Coord2) -> CellCount {
    mult(size.0 / 2, size.1 / 2)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Marked,
    Unmarked,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Marked => true,
            Self::Unmarked => true,
        }
    }
}
