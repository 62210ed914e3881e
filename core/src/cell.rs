use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellRole {
    #[default]
    Empty,
    Start,
    End,
}

impl CellRole {
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

/// One grid position.
///
/// `obstacle` and `player_mark` are owned by different actors: the placer sets
/// obstacles once per round, the player toggles marks. Neither is ever set on
/// an endpoint. `distance` and `predecessor` are solver scratch state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) role: CellRole,
    pub(crate) obstacle: bool,
    pub(crate) player_mark: bool,
    #[serde(skip)]
    pub(crate) distance: Option<CellCount>,
    #[serde(skip)]
    pub(crate) predecessor: Option<Coord2>,
}

impl Cell {
    pub const fn role(&self) -> CellRole {
        self.role
    }

    pub const fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    pub const fn is_marked(&self) -> bool {
        self.player_mark
    }

    /// Tentative distance from the last solve, `None` meaning infinite.
    pub const fn distance(&self) -> Option<CellCount> {
        self.distance
    }

    pub const fn predecessor(&self) -> Option<Coord2> {
        self.predecessor
    }

    pub(crate) fn reset_search(&mut self) {
        self.distance = None;
        self.predecessor = None;
    }
}
