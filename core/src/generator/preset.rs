use super::*;

/// Replays one fixed layout every round, ignoring the configured size.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetGridGenerator {
    grid: Grid,
}

impl PresetGridGenerator {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }
}

impl GridGenerator for PresetGridGenerator {
    fn generate(&mut self, _config: &GameConfig) -> Result<Grid> {
        if self.grid.endpoints().is_none() {
            return Err(GameError::InvalidEndpoints);
        }
        let mut grid = self.grid.clone();
        grid.clear_marks();
        Ok(grid)
    }
}
