//! Legal move generation.
//!
//! Men only move forward: red toward row 0, white toward row 7. There is no
//! promotion and no forced capture, so simple moves and jumps are offered side
//! by side.

use serde::Deserialize;

use crate::board::Board;
use crate::types::{Cell, Move, Player, Position};

/// Scan order for each square: down-right, up-left, up-right, down-left.
const DIAGONALS: [(i32, i32); 4] = [(1, 1), (-1, -1), (-1, 1), (1, -1)];

/// What a jump must pass over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpRule {
    /// The jumped square must hold an enemy piece.
    #[default]
    RequireCapture,
    /// The jumped square may also be empty. Such a jump captures nothing.
    AllowEmpty,
}

/// Rule configuration. Missing fields deserialize to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub first_player: Player,
    pub jump_rule: JumpRule,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            first_player: Player::Red,
            jump_rule: JumpRule::RequireCapture,
        }
    }
}

impl RuleSet {
    /// Every legal move for `player`: all simple moves in row-major order,
    /// followed by all jumps in row-major order.
    pub fn legal_moves(&self, board: &Board, player: Player) -> Vec<Move> {
        let pieces: Vec<Position> = board.squares_of(player.cell()).collect();
        let mut moves = Vec::new();

        for &from in &pieces {
            for (d_row, d_col) in DIAGONALS {
                if let Some(to) = from.offset(d_row, d_col, 1) {
                    if self.can_step(board, player, from, to) {
                        moves.push(Move::new(from, to));
                    }
                }
            }
        }

        for &from in &pieces {
            self.collect_jumps(board, player, from, &mut moves);
        }

        moves
    }

    /// Jumps available to the piece on `at`. Empty unless `at` holds one of
    /// `player`'s pieces.
    pub fn legal_jumps_from(&self, board: &Board, player: Player, at: Position) -> Vec<Move> {
        let mut moves = Vec::new();
        if board.piece_at_pos(at) == player.cell() {
            self.collect_jumps(board, player, at, &mut moves);
        }
        moves
    }

    fn collect_jumps(&self, board: &Board, player: Player, from: Position, out: &mut Vec<Move>) {
        for (d_row, d_col) in DIAGONALS {
            let (Some(over), Some(to)) = (
                from.offset(d_row, d_col, 1),
                from.offset(d_row, d_col, 2),
            ) else {
                continue;
            };
            if self.can_jump(board, player, from, over, to) {
                out.push(Move::new(from, to));
            }
        }
    }

    fn can_step(&self, board: &Board, player: Player, from: Position, to: Position) -> bool {
        board.piece_at_pos(to) == Cell::Empty && heads_forward(board, player, from, to)
    }

    fn can_jump(
        &self,
        board: &Board,
        player: Player,
        from: Position,
        over: Position,
        to: Position,
    ) -> bool {
        if board.piece_at_pos(to) != Cell::Empty || !heads_forward(board, player, from, to) {
            return false;
        }

        let jumped = board.piece_at_pos(over);
        if jumped == player.cell() {
            return false;
        }
        match self.jump_rule {
            JumpRule::RequireCapture => jumped == player.opponent().cell(),
            JumpRule::AllowEmpty => true,
        }
    }
}

/// The direction check reads the piece on `from`, not `player`: only a piece
/// of `player`'s own colour is held to `player`'s forward direction.
fn heads_forward(board: &Board, player: Player, from: Position, to: Position) -> bool {
    board.piece_at_pos(from) != player.cell() || player.advances(from.row, to.row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    fn mv(from: (u8, u8), to: (u8, u8)) -> Move {
        Move::new(pos(from.0, from.1), pos(to.0, to.1))
    }

    #[test]
    fn opening_offers_seven_moves_to_each_side() {
        let rules = RuleSet::default();
        let board = Board::new();

        let red = rules.legal_moves(&board, Player::Red);
        assert_eq!(
            red,
            vec![
                mv((5, 0), (4, 1)),
                mv((5, 2), (4, 1)),
                mv((5, 2), (4, 3)),
                mv((5, 4), (4, 3)),
                mv((5, 4), (4, 5)),
                mv((5, 6), (4, 5)),
                mv((5, 6), (4, 7)),
            ]
        );
        assert!(red.iter().all(|m| !m.is_jump()));

        let white = rules.legal_moves(&board, Player::White);
        assert_eq!(white.len(), 7);
        assert!(white.iter().all(|m| m.from.row == 2 && m.to.row == 3));
    }

    #[test]
    fn allow_empty_adds_ghost_jumps_after_simple_moves() {
        let rules = RuleSet {
            jump_rule: JumpRule::AllowEmpty,
            ..RuleSet::default()
        };
        let board = Board::new();

        let moves = rules.legal_moves(&board, Player::Red);

        assert_eq!(moves.len(), 13);
        assert!(moves[..7].iter().all(|m| !m.is_jump()));
        assert_eq!(
            &moves[7..],
            &[
                mv((5, 0), (3, 2)),
                mv((5, 2), (3, 0)),
                mv((5, 2), (3, 4)),
                mv((5, 4), (3, 2)),
                mv((5, 4), (3, 6)),
                mv((5, 6), (3, 4)),
            ]
        );
    }

    #[test]
    fn jumps_follow_simple_moves_and_direction_order() {
        let rules = RuleSet::default();
        let board = Board::from_rows([
            "........",
            "........",
            "........",
            "........",
            ".w.w....",
            "..r.....",
            "........",
            "........",
        ]);

        let moves = rules.legal_moves(&board, Player::Red);

        // up-left then up-right for the jumps, no simple moves left
        assert_eq!(moves, vec![mv((5, 2), (3, 0)), mv((5, 2), (3, 4))]);
    }

    #[test]
    fn pieces_never_move_backward() {
        let rules = RuleSet::default();
        let board = Board::from_rows([
            "........",
            "........",
            "........",
            "..w.....",
            ".r......",
            "........",
            "........",
            "........",
        ]);

        let red = rules.legal_moves(&board, Player::Red);
        assert_eq!(red, vec![mv((4, 1), (3, 0)), mv((4, 1), (2, 3))]);

        let white = rules.legal_moves(&board, Player::White);
        assert_eq!(white, vec![mv((3, 2), (4, 3)), mv((3, 2), (5, 0))]);
    }

    #[test]
    fn cannot_jump_own_piece_or_backward() {
        let rules = RuleSet {
            jump_rule: JumpRule::AllowEmpty,
            ..RuleSet::default()
        };
        let board = Board::from_rows([
            "........",
            "........",
            "...w....",
            "..r.....",
            ".r......",
            "........",
            "........",
            "........",
        ]);

        let jumps = rules.legal_jumps_from(&board, Player::Red, pos(4, 1));
        assert!(jumps.is_empty());

        let jumps = rules.legal_jumps_from(&board, Player::Red, pos(3, 2));
        assert_eq!(jumps, vec![mv((3, 2), (1, 0)), mv((3, 2), (1, 4))]);
    }

    #[test]
    fn legal_jumps_from_requires_own_piece_on_origin() {
        let rules = RuleSet::default();
        let board = Board::from_rows([
            "........",
            "........",
            "........",
            "........",
            "..w.....",
            ".r......",
            "........",
            "........",
        ]);

        assert_eq!(
            rules.legal_jumps_from(&board, Player::Red, pos(5, 1)),
            vec![mv((5, 1), (3, 3))]
        );
        assert!(rules.legal_jumps_from(&board, Player::White, pos(5, 1)).is_empty());
        assert!(rules.legal_jumps_from(&board, Player::Red, pos(4, 4)).is_empty());
    }

    #[test]
    fn jumps_stay_on_the_board() {
        let rules = RuleSet::default();
        let board = Board::from_rows([
            "........",
            "w.......",
            ".r......",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);

        assert_eq!(
            rules.legal_moves(&board, Player::Red),
            vec![mv((2, 1), (1, 2))]
        );
    }

    #[test]
    fn queries_are_idempotent() {
        let rules = RuleSet::default();
        let board = Board::new();

        assert_eq!(
            rules.legal_moves(&board, Player::White),
            rules.legal_moves(&board, Player::White)
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn rule_set_defaults_fill_missing_fields() {
        let rules = RuleSet::default();

        assert_eq!(rules.first_player, Player::Red);
        assert_eq!(rules.jump_rule, JumpRule::RequireCapture);
    }
}
