use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Shortest route between the endpoints, as found by the last solve.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Cells strictly between start and end, in walking order.
    cells: Vec<Coord2>,
    edges: CellCount,
}

impl Path {
    pub fn cells(&self) -> &[Coord2] {
        &self.cells
    }

    /// Number of cells between the endpoints, which is what a player has to
    /// mark to connect them.
    pub fn len(&self) -> CellCount {
        self.edges.saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of unit steps from start to end.
    pub fn edges(&self) -> CellCount {
        self.edges
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.contains(&coords)
    }
}

/// Walks the predecessor chain left by [`solve`] back from `end`.
///
/// Takes exactly `distance(end)` steps. Returns `None` when `end` was not
/// reached or the chain does not lead back to the source.
pub fn reconstruct_path(grid: &Grid, end: Coord2) -> Option<Path> {
    let edges = grid.get(end)?.distance()?;
    let mut cells = Vec::with_capacity(edges.into());

    let mut current = end;
    for _ in 0..edges {
        current = grid[current].predecessor()?;
        cells.push(current);
    }

    if grid[current].distance() != Some(0) {
        log::warn!("Predecessor chain from {:?} does not reach the source", end);
        return None;
    }

    // drop the source itself, keeping only intermediate cells
    cells.pop();
    cells.reverse();
    Some(Path { cells, edges })
}
