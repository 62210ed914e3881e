use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the grid")]
    OutOfBounds,
    #[error("Grid is too small to hold separate start and end cells")]
    GridTooSmall,
    #[error("Start and end must be distinct in-bounds cells")]
    InvalidEndpoints,
    #[error("Obstacle range minimum exceeds its maximum")]
    InvalidObstacleRange,
    #[error("No path connects the start and end cells")]
    NoPathExists,
    #[error("Round is not accepting edits, reset to start a new one")]
    NotEditing,
}

pub type Result<T> = core::result::Result<T, GameError>;
