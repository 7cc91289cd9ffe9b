//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal moves piece by piece, applies each candidate to a
//! scratch board, and keeps only those that leave the mover's own king out of
//! check. Pins and discovered checks need no special casing: the scratch board
//! answers them directly.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_pieces::{
    generate_bishop_moves, generate_knight_moves, generate_queen_moves, generate_rook_moves,
};
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::move_description::ChessMove;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        let pseudo = generate_pseudo_legal_moves(game_state);

        let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());
        for mv in pseudo {
            let next = apply_move(game_state, mv)?;

            // Illegal if own king is in check after move.
            if is_king_in_check(&next, game_state.side_to_move()) {
                continue;
            }

            legal.push(GeneratedMove {
                chess_move: mv,
                game_after_move: next,
            });
        }

        Ok(legal)
    }
}

/// Moves obeying piece-movement rules, not yet filtered for king safety.
pub fn generate_pseudo_legal_moves(game_state: &GameState) -> Vec<ChessMove> {
    let mut pseudo = Vec::<ChessMove>::with_capacity(64);

    generate_pawn_moves(game_state, &mut pseudo);
    generate_knight_moves(game_state, &mut pseudo);
    generate_bishop_moves(game_state, &mut pseudo);
    generate_rook_moves(game_state, &mut pseudo);
    generate_queen_moves(game_state, &mut pseudo);
    generate_king_moves(game_state, &mut pseudo);

    pseudo
}

/// Legal moves for the side to move. Order is unspecified.
pub fn legal_moves(game_state: &GameState) -> MoveGenResult<Vec<ChessMove>> {
    Ok(LegalMoveGenerator
        .generate_legal_moves(game_state)?
        .into_iter()
        .map(|generated| generated.chess_move)
        .collect())
}
