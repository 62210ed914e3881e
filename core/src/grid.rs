use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size table of cells plus the two endpoint coordinates.
///
/// Mutators keep the endpoint invariant: start and end never carry an obstacle
/// or a player mark, and no mutator can change that.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    start: Option<Coord2>,
    end: Option<Coord2>,
}

impl Grid {
    /// All cells empty, no walls, no marks, no endpoints.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            start: None,
            end: None,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.to_nd_index())
    }

    pub fn start(&self) -> Option<Coord2> {
        self.start
    }

    pub fn end(&self) -> Option<Coord2> {
        self.end
    }

    /// Both endpoints, once they have been placed.
    pub fn endpoints(&self) -> Option<(Coord2, Coord2)> {
        self.start.zip(self.end)
    }

    pub fn is_obstacle(&self, coords: Coord2) -> bool {
        self.get(coords).is_some_and(Cell::is_obstacle)
    }

    pub fn is_marked(&self, coords: Coord2) -> bool {
        self.get(coords).is_some_and(Cell::is_marked)
    }

    pub fn is_endpoint(&self, coords: Coord2) -> bool {
        self.get(coords).is_some_and(|cell| cell.role.is_endpoint())
    }

    /// Cells in row-major order together with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn obstacle_count(&self) -> CellCount {
        self.count_cells(Cell::is_obstacle)
    }

    pub fn mark_count(&self) -> CellCount {
        self.count_cells(Cell::is_marked)
    }

    fn count_cells(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|&cell| pred(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Assigns the start and end roles, clearing any previous endpoints.
    pub fn set_endpoints(&mut self, start: Coord2, end: Coord2) -> Result<()> {
        if start == end || !self.contains(start) || !self.contains(end) {
            return Err(GameError::InvalidEndpoints);
        }
        if [start, end]
            .iter()
            .any(|&pos| self.is_obstacle(pos) || self.is_marked(pos))
        {
            return Err(GameError::InvalidEndpoints);
        }

        for pos in [self.start.take(), self.end.take()].into_iter().flatten() {
            if let Some(cell) = self.get_mut(pos) {
                cell.role = CellRole::Empty;
            }
        }

        self.cells[start.to_nd_index()].role = CellRole::Start;
        self.cells[end.to_nd_index()].role = CellRole::End;
        self.start = Some(start);
        self.end = Some(end);
        log::debug!("endpoints placed, start: {:?}, end: {:?}", start, end);
        Ok(())
    }

    /// Picks two distinct, non-adjacent free cells uniformly at random.
    pub fn place_start_and_end(&mut self, rng: &mut SmallRng) -> Result<(Coord2, Coord2)> {
        let free: Vec<Coord2> = self
            .iter()
            .filter(|(_, cell)| !cell.obstacle && !cell.player_mark)
            .map(|(pos, _)| pos)
            .collect();

        // a start candidate needs at least one free cell that is neither itself
        // nor one of its neighbors
        let starts: Vec<Coord2> = free
            .iter()
            .copied()
            .filter(|&pos| {
                let free_neighbors = self
                    .iter_neighbors(pos)
                    .filter(|&n| !self.is_obstacle(n) && !self.is_marked(n))
                    .count();
                free.len() > free_neighbors + 1
            })
            .collect();

        if starts.is_empty() {
            return Err(GameError::GridTooSmall);
        }
        let start = starts[rng.random_range(0..starts.len())];

        let ends: Vec<Coord2> = free
            .into_iter()
            .filter(|&pos| pos != start && !are_adjacent(pos, start))
            .collect();
        let end = ends[rng.random_range(0..ends.len())];

        self.set_endpoints(start, end)?;
        Ok((start, end))
    }

    /// Flips the obstacle flag. No-op on endpoints, on marked cells, and
    /// outside the grid. Returns whether anything changed.
    pub fn toggle_obstacle(&mut self, coords: Coord2) -> bool {
        let value = !self.is_obstacle(coords);
        self.set_obstacle(coords, value)
    }

    pub fn set_obstacle(&mut self, coords: Coord2, value: bool) -> bool {
        let Some(cell) = self.get_mut(coords) else {
            return false;
        };
        if cell.role.is_endpoint() || cell.player_mark || cell.obstacle == value {
            return false;
        }
        cell.obstacle = value;
        true
    }

    /// Flips the player mark. Endpoints, obstacles and out-of-bounds
    /// coordinates are silently left alone.
    pub fn toggle_player_mark(&mut self, coords: Coord2) -> MarkOutcome {
        let value = !self.is_marked(coords);
        self.set_player_mark(coords, value)
    }

    pub fn set_player_mark(&mut self, coords: Coord2, value: bool) -> MarkOutcome {
        let Some(cell) = self.get_mut(coords) else {
            return MarkOutcome::NoChange;
        };
        if cell.role.is_endpoint() || cell.obstacle || cell.player_mark == value {
            return MarkOutcome::NoChange;
        }
        cell.player_mark = value;
        if value {
            MarkOutcome::Marked
        } else {
            MarkOutcome::Unmarked
        }
    }

    pub fn clear_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.player_mark = false;
        }
    }

    pub(crate) fn reset_search(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset_search();
        }
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_endpoints(size: Coord2, start: Coord2, end: Coord2) -> Grid {
        let mut grid = Grid::new(size);
        grid.set_endpoints(start, end).unwrap();
        grid
    }

    #[test]
    fn new_grid_is_blank() {
        let grid = Grid::new((4, 6));

        assert_eq!(grid.size(), (4, 6));
        assert_eq!(grid.total_cells(), 24);
        assert!(grid.iter().all(|(_, cell)| *cell == Cell::default()));
        assert_eq!(grid.endpoints(), None);
    }

    #[test]
    fn endpoints_cannot_be_walled_or_marked() {
        let mut grid = grid_with_endpoints((5, 5), (0, 0), (4, 4));

        assert!(!grid.toggle_obstacle((0, 0)));
        assert_eq!(grid.toggle_player_mark((4, 4)), MarkOutcome::NoChange);
        assert!(!grid[(0, 0)].is_obstacle());
        assert!(!grid[(4, 4)].is_marked());
    }

    #[test]
    fn obstacles_reject_marks() {
        let mut grid = grid_with_endpoints((5, 5), (0, 0), (4, 4));

        assert!(grid.toggle_obstacle((2, 2)));
        assert_eq!(grid.toggle_player_mark((2, 2)), MarkOutcome::NoChange);
        assert_eq!(grid.mark_count(), 0);
    }

    #[test]
    fn toggling_mark_twice_restores_cell() {
        let mut grid = grid_with_endpoints((5, 5), (0, 0), (4, 4));

        assert_eq!(grid.toggle_player_mark((1, 1)), MarkOutcome::Marked);
        assert_eq!(grid.mark_count(), 1);
        assert_eq!(grid.toggle_player_mark((1, 1)), MarkOutcome::Unmarked);
        assert_eq!(grid.mark_count(), 0);
    }

    #[test]
    fn out_of_bounds_mutations_are_ignored() {
        let mut grid = grid_with_endpoints((3, 3), (0, 0), (2, 2));
        let before = grid.clone();

        assert!(!grid.toggle_obstacle((3, 0)));
        assert_eq!(grid.toggle_player_mark((0, 9)), MarkOutcome::NoChange);
        assert_eq!(grid, before);
        assert_eq!(grid.validate_coords((3, 3)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn set_endpoints_rejects_same_cell() {
        let mut grid = Grid::new((3, 3));
        assert_eq!(
            grid.set_endpoints((1, 1), (1, 1)),
            Err(GameError::InvalidEndpoints)
        );
    }

    #[test]
    fn set_endpoints_moves_roles() {
        let mut grid = grid_with_endpoints((3, 3), (0, 0), (2, 2));
        grid.set_endpoints((0, 2), (2, 0)).unwrap();

        assert_eq!(grid[(0, 0)].role(), CellRole::Empty);
        assert_eq!(grid[(2, 2)].role(), CellRole::Empty);
        assert_eq!(grid[(0, 2)].role(), CellRole::Start);
        assert_eq!(grid[(2, 0)].role(), CellRole::End);
    }

    #[test]
    fn random_endpoints_are_distinct_and_not_adjacent() {
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut grid = Grid::new((6, 7));
            let (start, end) = grid.place_start_and_end(&mut rng).unwrap();

            assert_ne!(start, end);
            assert!(!are_adjacent(start, end));
            assert_eq!(grid[start].role(), CellRole::Start);
            assert_eq!(grid[end].role(), CellRole::End);
        }
    }

    #[test]
    fn smallest_grid_uses_a_diagonal() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut grid = Grid::new((2, 2));
        let (start, end) = grid.place_start_and_end(&mut rng).unwrap();

        assert_ne!(start.0, end.0);
        assert_ne!(start.1, end.1);
    }

    #[test]
    fn single_row_of_two_is_too_small() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut grid = Grid::new((1, 2));
        assert_eq!(
            grid.place_start_and_end(&mut rng),
            Err(GameError::GridTooSmall)
        );
    }
}
