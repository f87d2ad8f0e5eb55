use thiserror::Error;

use crate::game::Move;
use crate::types::Point;

/// Recoverable errors at the edges of the engine (input parsing, checked play).
///
/// Rule violations inside the engine are plain booleans from
/// [`crate::game::GameState::is_valid_move`]; this type is for callers that
/// want a reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    #[error("Invalid coordinate: {0:?}")]
    InvalidCoordinate(String),

    #[error("Point {0} is off the {1}x{2} board")]
    OffBoard(Point, usize, usize),

    #[error("Illegal move: {0:?}")]
    IllegalMove(Move),

    #[error("Game is already over")]
    GameOver,
}

/// Convenience Result type for engine operations.
pub type Result<T> = std::result::Result<T, GoError>;
