use crate::types::{BOARD_WIDTH, Cell, Move, Position};

const BOARD_SIZE: usize = BOARD_WIDTH as usize;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const WHITE_START: u64 = playable_rows(0, 2);
const RED_START: u64 = playable_rows(5, 7);

/// Background shade of a square. Pieces only ever stand on `Dark` squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareShade {
    Light,
    Dark,
}

/// Checkers board state represented by two bitboards, bit `row * 8 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    red: u64,
    white: u64,
}

impl Board {
    /// Creates the starting layout:
    /// white on the dark squares of rows 0-2, red on rows 5-7.
    pub fn new() -> Self {
        Self {
            red: RED_START,
            white: WHITE_START,
        }
    }

    /// Puts every piece back on its starting square.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Caller contract: `row` and `col` are below 8.
    pub fn piece_at(&self, row: u8, col: u8) -> Cell {
        debug_assert!(
            row < BOARD_WIDTH && col < BOARD_WIDTH,
            "piece_at({row}, {col}) is off the board"
        );
        self.cell(usize::from(row) * BOARD_SIZE + usize::from(col))
    }

    pub fn piece_at_pos(&self, pos: Position) -> Cell {
        self.cell(pos.index())
    }

    /// Moves the piece on `mv.from` to `mv.to`.
    ///
    /// A jump also clears the jumped square when it holds an enemy piece.
    /// Caller contract: `mv` came from the rules engine for this board;
    /// nothing is re-validated here.
    pub fn apply_move(&mut self, mv: Move) {
        let mover = self.piece_at_pos(mv.from);
        self.set(mv.to, mover);
        self.set(mv.from, Cell::Empty);

        if let Some(mid) = mv.midpoint() {
            let jumped = self.piece_at_pos(mid);
            if jumped != Cell::Empty && jumped != mover {
                self.set(mid, Cell::Empty);
            }
        }
    }

    /// Returns `(red_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.red.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn occupied_count(&self) -> u8 {
        (self.red | self.white).count_ones() as u8
    }

    /// Squares holding `cell`, in row-major order.
    pub fn squares_of(&self, cell: Cell) -> impl Iterator<Item = Position> + use<> {
        let mask = match cell {
            Cell::Red => self.red,
            Cell::White => self.white,
            Cell::Empty => !(self.red | self.white),
        };
        bitmask_to_indices(mask).map(Position::from_index)
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=red, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = self.cell(pos).as_u8();
        }
        board
    }

    /// CRC32 over `to_array`. Equal boards always share a fingerprint.
    pub fn fingerprint(&self) -> u32 {
        crc32fast::hash(&self.to_array())
    }

    pub fn square_shade(row: u8, col: u8) -> SquareShade {
        if (row ^ col) & 1 == 0 {
            SquareShade::Light
        } else {
            SquareShade::Dark
        }
    }

    fn cell(&self, pos: usize) -> Cell {
        let square = bit(pos);
        if (self.red & square) != 0 {
            Cell::Red
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    fn set(&mut self, pos: Position, cell: Cell) {
        let square = bit(pos.index());
        self.red &= !square;
        self.white &= !square;
        match cell {
            Cell::Red => self.red |= square,
            Cell::White => self.white |= square,
            Cell::Empty => {}
        }
    }

    /// Builds a board from eight rows of `r`, `w` and `.`/space.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self { red: 0, white: 0 };
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let square = bit(row * BOARD_SIZE + col);
                match ch {
                    'r' => board.red |= square,
                    'w' => board.white |= square,
                    _ => {}
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

const fn playable_rows(first: usize, last: usize) -> u64 {
    let mut mask = 0u64;
    let mut row = first;
    while row <= last {
        let mut col = 0;
        while col < BOARD_SIZE {
            if (row + col) % 2 == 1 {
                mask |= 1u64 << (row * BOARD_SIZE + col);
            }
            col += 1;
        }
        row += 1;
    }
    mask
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn bitmask_to_indices(mask: u64) -> impl Iterator<Item = usize> {
    let mut bits = mask;
    std::iter::from_fn(move || {
        if bits == 0 {
            return None;
        }
        let idx = bits.trailing_zeros() as usize;
        bits &= bits - 1;
        Some(idx)
    })
}
