use alloc::collections::BinaryHeap;
use core::cmp::Ordering;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// End reached; `distance` counts edges from start to end.
    Found { distance: CellCount },
    NoPath,
}

impl SolveOutcome {
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub const fn distance(self) -> Option<CellCount> {
        match self {
            Self::Found { distance } => Some(distance),
            Self::NoPath => None,
        }
    }
}

/// Frontier entry, ordered so that `BinaryHeap` pops the smallest distance
/// first and, among equal distances, the earliest inserted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct FrontierEntry {
    distance: CellCount,
    seq: u32,
    pos: Coord2,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.distance, other.seq).cmp(&(self.distance, self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source shortest path over unit edges between non-obstacle cells.
///
/// Every cell's distance and predecessor are reset first. On success the
/// predecessor chain from `end` back to `start` is left in the grid for
/// [`reconstruct_path`]. Player marks do not affect traversal.
pub fn solve(grid: &mut Grid, start: Coord2, end: Coord2) -> SolveOutcome {
    grid.reset_search();

    if !grid.contains(start) || !grid.contains(end) {
        log::warn!("Solve requested outside the grid: {:?} -> {:?}", start, end);
        return SolveOutcome::NoPath;
    }

    let mut visited: Array2<bool> = Array2::default(grid.size().to_nd_index());
    let mut frontier = BinaryHeap::new();
    let mut seq = 0;

    grid.cell_mut(start).distance = Some(0);
    frontier.push(FrontierEntry {
        distance: 0,
        seq,
        pos: start,
    });

    while let Some(FrontierEntry { distance, pos, .. }) = frontier.pop() {
        if visited[pos.to_nd_index()] {
            continue;
        }

        // the first extraction of end is final since weights are non-negative
        if pos == end {
            log::debug!("Shortest path {:?} -> {:?} has {} edges", start, end, distance);
            return SolveOutcome::Found { distance };
        }

        visited[pos.to_nd_index()] = true;
        log::trace!("Expanding {:?} at distance {}", pos, distance);

        for next in neighbors_of(grid, pos) {
            if visited[next.to_nd_index()] {
                continue;
            }

            let candidate = distance + 1;
            let cell = grid.cell_mut(next);
            if cell.distance.is_none_or(|current| candidate < current) {
                cell.distance = Some(candidate);
                cell.predecessor = Some(pos);
                seq += 1;
                frontier.push(FrontierEntry {
                    distance: candidate,
                    seq,
                    pos: next,
                });
            }
        }
    }

    log::debug!("No path from {:?} to {:?}", start, end);
    SolveOutcome::NoPath
}
