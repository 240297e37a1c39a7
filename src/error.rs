use crate::point::Point;
use thiserror::Error;

/// Errors raised by mutating or querying a maze.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MazeError {
    #[error("cell {point} lies outside the {size}x{size} grid")]
    OutOfBounds { point: Point, size: usize },

    #[error("cells {0} and {1} are not adjacent")]
    NotAdjacent(Point, Point),

    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),

    #[error("no path from {start} to {goal}")]
    NoPath { start: Point, goal: Point },

    #[error("hole fraction {0} must lie between 0 and 1")]
    InvalidHoleFraction(f64),
}

/// Result type for maze operations
pub type MazeResult<T> = Result<T, MazeError>;
