use wasm_bindgen::prelude::*;

pub mod board;
pub mod error;
pub mod game;
pub mod rules;
pub mod types;

use crate::board::{Board, SquareShade};
use crate::game::{ClickOutcome, Game};
use crate::rules::RuleSet;
use crate::types::{Player, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Browser-facing handle on one game. The page redraws from `state()` after
/// every call that returns `true`.
#[wasm_bindgen]
pub struct CheckersApp {
    game: Game,
}

#[wasm_bindgen]
impl CheckersApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            game: Game::default(),
        }
    }

    /// `options` is a `RuleSet`-shaped object, e.g.
    /// `{ first_player: "white", jump_rule: "allow_empty" }`.
    pub fn with_rules(options: JsValue) -> Result<CheckersApp, JsError> {
        let rules: RuleSet = if options.is_undefined() || options.is_null() {
            RuleSet::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        Ok(Self {
            game: Game::new(rules),
        })
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
    }

    /// Returns `true` when the click changed the game.
    pub fn handle_click(&mut self, row: u8, col: u8) -> bool {
        self.game.handle_click(row, col) != ClickOutcome::Ignored
    }

    /// Same as `handle_click` for a canvas point.
    pub fn handle_pointer(&mut self, x: f64, y: f64, cell_px: f64) -> bool {
        match Position::from_pixel(x, y, cell_px) {
            Some(pos) => self.handle_click(pos.row, pos.col),
            None => false,
        }
    }

    /// 0=empty, 1=red, 2=white. Off-board squares read as empty.
    pub fn cell_contents(&self, row: u8, col: u8) -> u8 {
        match Position::new(row, col) {
            Ok(pos) => self.game.board().piece_at_pos(pos).as_u8(),
            Err(_) => 0,
        }
    }

    /// 0=light, 1=dark.
    pub fn square_shade(&self, row: u8, col: u8) -> u8 {
        match Board::square_shade(row, col) {
            SquareShade::Light => 0,
            SquareShade::Dark => 1,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.to_game_state())?)
    }

    /// Unknown player codes have no legal moves.
    pub fn legal_moves_for(&self, player: u8) -> Result<JsValue, JsError> {
        let moves = match Player::try_from(player) {
            Ok(player) => self.game.legal_moves_for(player),
            Err(_) => Vec::new(),
        };
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }
}

impl Default for CheckersApp {
    fn default() -> Self {
        Self::new()
    }
}
