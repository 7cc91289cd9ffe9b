//! Attack and check detection.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = game_state.king_square(color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` attacks `square`.
///
/// Looks outward from the target: a pawn of the attacker's color attacks
/// `square` iff a pawn of the defender's color on `square` would attack it.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let occupancy = game_state.occupancy_all();
    let attacker = |kind| game_state.pieces_of(attacker_color, kind);

    if pawn_attacks(attacker_color.opposite(), square) & attacker(PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_attacks(square) & attacker(PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & attacker(PieceKind::King) != 0 {
        return true;
    }

    let bishops_queens = attacker(PieceKind::Bishop) | attacker(PieceKind::Queen);
    if bishop_attacks(square, occupancy) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = attacker(PieceKind::Rook) | attacker(PieceKind::Queen);
    rook_attacks(square, occupancy) & rooks_queens != 0
}
