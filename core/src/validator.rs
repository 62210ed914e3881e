use alloc::collections::{BTreeSet, VecDeque};

use crate::*;

/// Whether the player's marks form a connected 4-way route from `start` to
/// `end`.
///
/// Only marked cells and `end` itself are walkable. Obstacles are not
/// consulted: a mark means "my route goes here", and marks can never sit on
/// obstacles in the first place.
pub fn player_route_connects(grid: &Grid, start: Coord2, end: Coord2) -> bool {
    if !grid.contains(start) || !grid.contains(end) {
        return false;
    }

    let mut visited = BTreeSet::from([start]);
    let mut to_visit = VecDeque::from([start]);

    while let Some(current) = to_visit.pop_front() {
        if current == end {
            return true;
        }

        for next in grid.iter_neighbors(current) {
            if (next == end || grid.is_marked(next)) && visited.insert(next) {
                to_visit.push_back(next);
            }
        }
    }

    log::trace!("Marked region from {:?} covers {} cells", start, visited.len());
    false
}
