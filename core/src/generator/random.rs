use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Sampling budget per requested block before the placer gives up on it.
pub const PLACEMENT_ATTEMPTS_PER_BLOCK: u32 = 100;

/// Random endpoints plus a random number of 2×2 obstacle blocks, all drawn
/// from one seeded generator so a seed replays the same sequence of rounds.
#[derive(Clone, Debug)]
pub struct RandomGridGenerator {
    rng: SmallRng,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<Grid> {
        config.validate()?;

        let mut grid = Grid::new(config.size);
        grid.place_start_and_end(&mut self.rng)?;

        let (min, max) = config.obstacles;
        let requested = self.rng.random_range(min..=max);
        let placed = place_obstacles(&mut grid, requested, config.keep_route_open, &mut self.rng);
        log::debug!(
            "generated {}x{} grid with {} of {} obstacle blocks",
            config.size.0,
            config.size.1,
            placed,
            requested
        );
        Ok(grid)
    }
}

/// Places up to `count` non-overlapping 2×2 obstacle blocks and returns how
/// many were placed.
///
/// Blocks never cover an endpoint, a player mark, or an existing obstacle.
/// With `keep_route_open`, a block that would cut the start off from the end
/// is rolled back. Sampling stops after [`PLACEMENT_ATTEMPTS_PER_BLOCK`]
/// attempts per requested block, so infeasible counts end early.
pub fn place_obstacles(
    grid: &mut Grid,
    count: CellCount,
    keep_route_open: bool,
    rng: &mut SmallRng,
) -> CellCount {
    let (rows, cols) = grid.size();
    if rows < 2 || cols < 2 {
        if count > 0 {
            log::warn!("Grid {}x{} cannot hold a 2x2 obstacle", rows, cols);
        }
        return 0;
    }

    let endpoints = grid.endpoints();
    let mut budget = u32::from(count).saturating_mul(PLACEMENT_ATTEMPTS_PER_BLOCK);
    let mut placed = 0;

    while placed < count && budget > 0 {
        budget -= 1;

        let anchor = (rng.random_range(0..rows - 1), rng.random_range(0..cols - 1));
        let block = block_at(anchor);
        let free = block.iter().all(|&pos| {
            !grid.is_endpoint(pos) && !grid.is_obstacle(pos) && !grid.is_marked(pos)
        });
        if !free {
            continue;
        }

        for &pos in &block {
            grid.set_obstacle(pos, true);
        }

        if keep_route_open {
            if let Some((start, end)) = endpoints {
                if !solve(grid, start, end).is_found() {
                    log::trace!("Obstacle at {:?} would block the route, rolled back", anchor);
                    for &pos in &block {
                        grid.set_obstacle(pos, false);
                    }
                    continue;
                }
            }
        }

        log::trace!("Obstacle placed at {:?}", anchor);
        placed += 1;
    }

    if placed < count {
        log::warn!(
            "Obstacle placement gave up, requested {} but placed {}",
            count,
            placed
        );
    }
    placed
}

const fn block_at((row, col): Coord2) -> [Coord2; 4] {
    [(row, col), (row + 1, col), (row, col + 1), (row + 1, col + 1)]
}
