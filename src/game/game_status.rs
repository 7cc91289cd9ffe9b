//! Terminal-state detection.
//!
//! Status is always derived from the current board plus the boards that came
//! before it; nothing here is cached.

use std::fmt;

use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVE_LIMIT, REPETITION_DRAW_COUNT};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    DrawByFiftyMove,
    DrawByInsufficientMaterial,
    DrawByRepetition,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    #[inline]
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawByFiftyMove
                | GameStatus::DrawByInsufficientMaterial
                | GameStatus::DrawByRepetition
        )
    }

    #[inline]
    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
            GameStatus::DrawByFiftyMove => f.write_str("draw by fifty-move rule"),
            GameStatus::DrawByInsufficientMaterial => f.write_str("draw by insufficient material"),
            GameStatus::DrawByRepetition => f.write_str("draw by threefold repetition"),
        }
    }
}

/// Status of `game_state`, given every board that preceded it in the game.
pub fn evaluate_status(game_state: &GameState, previous: &[GameState]) -> MoveGenResult<GameStatus> {
    evaluate_status_by_keys(game_state, previous.iter().map(GameState::position_key))
}

/// Same as [`evaluate_status`], with earlier positions given as their
/// [`GameState::position_key`]s.
///
/// Precedence: checkmate, stalemate, insufficient material, fifty-move rule,
/// repetition.
pub fn evaluate_status_by_keys<K: AsRef<str>>(
    game_state: &GameState,
    previous_keys: impl IntoIterator<Item = K>,
) -> MoveGenResult<GameStatus> {
    let side = game_state.side_to_move();
    let has_moves = !LegalMoveGenerator.generate_legal_moves(game_state)?.is_empty();

    if !has_moves {
        return Ok(if is_king_in_check(game_state, side) {
            GameStatus::Checkmate {
                winner: side.opposite(),
            }
        } else {
            GameStatus::Stalemate
        });
    }

    if has_insufficient_material(game_state) {
        return Ok(GameStatus::DrawByInsufficientMaterial);
    }

    if game_state.halfmove_clock() >= FIFTY_MOVE_HALFMOVE_LIMIT {
        return Ok(GameStatus::DrawByFiftyMove);
    }

    if repetition_count(game_state, previous_keys) >= REPETITION_DRAW_COUNT {
        return Ok(GameStatus::DrawByRepetition);
    }

    Ok(GameStatus::InProgress)
}

/// Occurrences of the current position, itself included.
pub fn repetition_count<K: AsRef<str>>(
    game_state: &GameState,
    previous_keys: impl IntoIterator<Item = K>,
) -> usize {
    let key = game_state.position_key();
    1 + previous_keys
        .into_iter()
        .filter(|earlier| earlier.as_ref() == key)
        .count()
}

/// King vs king, or king and a single bishop or knight vs king.
///
/// Other dead positions (two knights, same-colored bishops) are not detected.
pub fn has_insufficient_material(game_state: &GameState) -> bool {
    let mut minors = 0u32;
    for color in Color::ALL {
        for kind in [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen] {
            if game_state.pieces_of(color, kind) != 0 {
                return false;
            }
        }
        minors += game_state.pieces_of(color, PieceKind::Knight).count_ones();
        minors += game_state.pieces_of(color, PieceKind::Bishop).count_ones();
    }
    minors <= 1
}
