use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer should draw for one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Empty,
    Start,
    End,
    Obstacle,
    Marked,
    /// On the shortest path, not marked by the player.
    OnPath,
    /// Marked by the player and also on the shortest path.
    MarkedOnPath,
}

/// Read-only copy of the round for the rendering side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub start: Coord2,
    pub end: Coord2,
    pub obstacles: Array2<bool>,
    pub marks: Array2<bool>,
    pub path: Vec<Coord2>,
    pub state: SessionState,
    pub round: u32,
    pub mark_count: CellCount,
    pub result: Option<EvaluationResult>,
}

impl Snapshot {
    pub fn from_session<G: GridGenerator>(session: &Session<G>) -> Self {
        let grid = session.grid();
        let size = grid.size();
        let mut obstacles = Array2::from_elem(size.to_nd_index(), false);
        let mut marks = Array2::from_elem(size.to_nd_index(), false);

        for (coords, cell) in grid.iter() {
            obstacles[coords.to_nd_index()] = cell.is_obstacle();
            marks[coords.to_nd_index()] = cell.is_marked();
        }

        Self {
            size,
            start: session.start(),
            end: session.end(),
            obstacles,
            marks,
            path: session
                .optimal_path()
                .map(|path| path.cells().to_vec())
                .unwrap_or_default(),
            state: session.state(),
            round: session.round(),
            mark_count: session.mark_count(),
            result: session.last_result(),
        }
    }

    /// What to draw at `coords`, or `None` outside the grid.
    pub fn view_at(&self, coords: Coord2) -> Option<CellView> {
        let index = coords.to_nd_index();
        let obstacle = *self.obstacles.get(index)?;
        let marked = *self.marks.get(index)?;

        if coords == self.start {
            return Some(CellView::Start);
        }
        if coords == self.end {
            return Some(CellView::End);
        }

        let on_path = self.path.contains(&coords);
        Some(match (obstacle, marked, on_path) {
            (true, _, _) => CellView::Obstacle,
            (false, true, true) => CellView::MarkedOnPath,
            (false, true, false) => CellView::Marked,
            (false, false, true) => CellView::OnPath,
            (false, false, false) => CellView::Empty,
        })
    }
}
