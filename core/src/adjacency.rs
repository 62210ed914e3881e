use smallvec::SmallVec;

use crate::*;

/// Up to four neighbor coordinates, stored inline.
pub type Neighbors = SmallVec<[Coord2; 4]>;

/// Traversable 4-directional neighbors of `coords` under the current walls.
///
/// Computed fresh on each call in [`DISPLACEMENTS`] order; nothing is cached,
/// so wall changes between calls are always observed.
pub fn neighbors_of(grid: &Grid, coords: Coord2) -> Neighbors {
    grid.iter_neighbors(coords)
        .filter(|&pos| !grid.is_obstacle(pos))
        .collect()
}
