use tracing::{debug, trace};

use crate::board::Board;
use crate::error::GameError;
use crate::rules::RuleSet;
use crate::types::{Cell, GameState, Move, Phase, Player, Position};

/// What a click did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not a legal source or destination; nothing changed.
    Ignored,
    /// The square became the selected source.
    Selected(Position),
    Moved(MoveOutcome),
}

/// State reached after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The jumping piece can jump again from `at`; the turn does not pass.
    ContinueJump { at: Position },
    TurnPassed { next: Player },
    /// The player to move has no legal move and loses.
    GameOver { winner: Player },
}

/// A single game: owns its board and drives the select/move turn loop.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    rules: RuleSet,
    current_player: Player,
    phase: Phase,
    legal: Vec<Move>,
    selected: Option<Position>,
    winner: Option<Player>,
    last_move: Option<Move>,
    captured: Option<Position>,
}

impl Game {
    pub fn new(rules: RuleSet) -> Self {
        let mut game = Self {
            board: Board::new(),
            rules,
            current_player: rules.first_player,
            phase: Phase::AwaitingSelection,
            legal: Vec::new(),
            selected: None,
            winner: None,
            last_move: None,
            captured: None,
        };
        game.new_game();
        game
    }

    /// Resets the board and hands the first turn to `rules.first_player`.
    pub fn new_game(&mut self) {
        self.board.reset();
        self.selected = None;
        self.winner = None;
        self.last_move = None;
        self.captured = None;
        self.begin_turn(self.rules.first_player);
        debug!(first_player = ?self.current_player, "new game");
    }

    /// Feeds one board click into the turn loop.
    ///
    /// Clicking the source of any legal move selects it, even while another
    /// square is selected. Clicking a destination of the selected source
    /// plays that move. Everything else is ignored.
    pub fn handle_click(&mut self, row: u8, col: u8) -> ClickOutcome {
        if self.phase == Phase::GameOver {
            trace!(row, col, "click after game over");
            return ClickOutcome::Ignored;
        }
        let Ok(pos) = Position::new(row, col) else {
            trace!(row, col, "click off the board");
            return ClickOutcome::Ignored;
        };

        if self.legal.iter().any(|mv| mv.from == pos) {
            self.selected = Some(pos);
            self.phase = Phase::AwaitingDestination;
            debug!(player = ?self.current_player, row, col, "selected");
            return ClickOutcome::Selected(pos);
        }

        let chosen = self.selected.and_then(|from| {
            self.legal
                .iter()
                .copied()
                .find(|mv| mv.from == from && mv.to == pos)
        });
        match chosen {
            Some(mv) => ClickOutcome::Moved(self.resolve(mv)),
            None => {
                trace!(row, col, "click ignored");
                ClickOutcome::Ignored
            }
        }
    }

    /// Plays `mv` directly. Fails unless `mv` is in the current legal set.
    pub fn play(&mut self, mv: Move) -> Result<MoveOutcome, GameError> {
        if self.phase == Phase::GameOver {
            return Err(GameError::GameOver);
        }
        if !self.legal.contains(&mv) {
            return Err(GameError::IllegalMove(mv));
        }
        Ok(self.resolve(mv))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Moves the current player may make right now. During a jump
    /// continuation only the follow-up jumps are listed.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }

    /// Generator query for any player on the current board.
    pub fn legal_moves_for(&self, player: Player) -> Vec<Move> {
        self.rules.legal_moves(&self.board, player)
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Caller contract: `row` and `col` are below 8.
    pub fn cell_contents(&self, row: u8, col: u8) -> Cell {
        self.board.piece_at(row, col)
    }

    pub fn to_game_state(&self) -> GameState {
        let (red_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.as_u8(),
            phase: self.phase,
            red_count,
            white_count,
            is_game_over: self.is_game_over(),
            winner: self.winner.map_or(0, Player::as_u8),
            selected: self.selected,
            legal_moves: self.legal.clone(),
            last_move: self.last_move,
            captured: self.captured,
            fingerprint: self.board.fingerprint(),
        }
    }

    fn resolve(&mut self, mv: Move) -> MoveOutcome {
        let mover = self.current_player;
        self.captured = mv
            .midpoint()
            .filter(|&mid| self.board.piece_at_pos(mid) == mover.opponent().cell());
        self.board.apply_move(mv);
        self.last_move = Some(mv);
        debug!(
            player = ?mover,
            from = ?(mv.from.row, mv.from.col),
            to = ?(mv.to.row, mv.to.col),
            captured = ?self.captured,
            "move applied"
        );

        if mv.is_jump() {
            let follow_up = self.rules.legal_jumps_from(&self.board, mover, mv.to);
            if !follow_up.is_empty() {
                self.legal = follow_up;
                self.selected = Some(mv.to);
                self.phase = Phase::AwaitingDestination;
                debug!(player = ?mover, jumps = self.legal.len(), "jump continues");
                return MoveOutcome::ContinueJump { at: mv.to };
            }
        }

        self.selected = None;
        let next = mover.opponent();
        if self.begin_turn(next) {
            MoveOutcome::TurnPassed { next }
        } else {
            MoveOutcome::GameOver { winner: mover }
        }
    }

    /// Hands the turn to `player`. Returns `false` and ends the game when
    /// `player` has nothing to play.
    fn begin_turn(&mut self, player: Player) -> bool {
        self.current_player = player;
        self.legal = self.rules.legal_moves(&self.board, player);
        if self.legal.is_empty() {
            self.phase = Phase::GameOver;
            self.winner = Some(player.opponent());
            debug!(loser = ?player, "no legal moves, game over");
            return false;
        }
        self.phase = Phase::AwaitingSelection;
        debug!(player = ?player, moves = self.legal.len(), "turn started");
        true
    }

    #[cfg(test)]
    fn with_board_for_test(rules: RuleSet, board: Board) -> Self {
        let mut game = Self::new(rules);
        game.board = board;
        game.begin_turn(rules.first_player);
        game
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}
