//! Errors reported by the checkers engine.

use crate::types::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("unknown player value: {0}")]
    UnknownPlayer(u8),
    #[error(
        "illegal move: ({}, {}) -> ({}, {})",
        .0.from.row, .0.from.col, .0.to.row, .0.to.col
    )]
    IllegalMove(Move),
    #[error("game is already over")]
    GameOver,
}
