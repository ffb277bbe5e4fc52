use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const BOARD_WIDTH: u8 = 8;

/// Occupancy of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Red,
    White,
}

impl Cell {
    /// Wire code used by `Board::to_array`: 0=empty, 1=red, 2=white.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Red => 1,
            Self::White => 2,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::Red => Some(Player::Red),
            Self::White => Some(Player::White),
        }
    }
}

/// One of the two sides.
///
/// Red starts on rows 5..=7 and moves toward row 0.
/// White starts on rows 0..=2 and moves toward row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Red => Self::White,
            Self::White => Self::Red,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Self::Red => Cell::Red,
            Self::White => Cell::White,
        }
    }

    pub fn as_u8(self) -> u8 {
        self.cell().as_u8()
    }

    /// Whether going from `from_row` to `to_row` is toward the opponent's edge.
    pub fn advances(self, from_row: u8, to_row: u8) -> bool {
        match self {
            Self::Red => to_row < from_row,
            Self::White => to_row > from_row,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Red),
            2 => Ok(Self::White),
            other => Err(GameError::UnknownPlayer(other)),
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if row >= BOARD_WIDTH || col >= BOARD_WIDTH {
            return Err(GameError::OutOfBounds {
                row: i32::from(row),
                col: i32::from(col),
            });
        }
        Ok(Self { row, col })
    }

    /// Square under a pixel of a canvas drawn with `cell_px` sized squares.
    /// Returns `None` for points outside the board.
    pub fn from_pixel(x: f64, y: f64, cell_px: f64) -> Option<Self> {
        if !(cell_px > 0.0) || !(x >= 0.0) || !(y >= 0.0) {
            return None;
        }
        let col = (x / cell_px).floor();
        let row = (y / cell_px).floor();
        let limit = f64::from(BOARD_WIDTH);
        if row >= limit || col >= limit {
            return None;
        }
        Some(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        usize::from(self.row) * usize::from(BOARD_WIDTH) + usize::from(self.col)
    }

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < 64, "square index out of range: {index}");
        let width = usize::from(BOARD_WIDTH);
        Self {
            row: (index / width) as u8,
            col: (index % width) as u8,
        }
    }

    /// Square `steps` diagonal steps away, `None` when that leaves the board.
    pub fn offset(self, d_row: i32, d_col: i32, steps: i32) -> Option<Self> {
        let row = i32::from(self.row) + d_row * steps;
        let col = i32::from(self.col) + d_col * steps;
        let width = i32::from(BOARD_WIDTH);
        if (0..width).contains(&row) && (0..width).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

/// A source/destination pair. Only the rules engine hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// A row distance of two marks a jump.
    pub fn is_jump(&self) -> bool {
        self.from.row.abs_diff(self.to.row) == 2
    }

    /// The jumped-over square. `None` for simple moves.
    pub fn midpoint(&self) -> Option<Position> {
        self.is_jump().then(|| Position {
            row: (self.from.row + self.to.row) / 2,
            col: (self.from.col + self.to.col) / 2,
        })
    }
}

/// Where the turn state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    AwaitingSelection,
    AwaitingDestination,
    GameOver,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cell codes, see `Cell::as_u8`.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub phase: Phase,
    pub red_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// 0 while the game is running.
    pub winner: u8,
    pub selected: Option<Position>,
    pub legal_moves: Vec<Move>,
    pub last_move: Option<Move>,
    /// Contract:
    /// - Jump that took a piece: the emptied square.
    /// - Simple move, or no move yet: `None`.
    pub captured: Option<Position>,
    pub fingerprint: u32,
}
