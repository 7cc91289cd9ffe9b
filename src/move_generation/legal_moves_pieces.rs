//! Pseudo-legal knight, bishop, rook and queen moves.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::{bishop_attacks, knight_attacks, queen_attacks, rook_attacks};
use crate::moves::move_description::ChessMove;

pub fn generate_knight_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    generate_piece_moves(game_state, PieceKind::Knight, |sq, _| knight_attacks(sq), out);
}

pub fn generate_bishop_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    generate_piece_moves(game_state, PieceKind::Bishop, bishop_attacks, out);
}

pub fn generate_rook_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    generate_piece_moves(game_state, PieceKind::Rook, rook_attacks, out);
}

pub fn generate_queen_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    generate_piece_moves(game_state, PieceKind::Queen, queen_attacks, out);
}

fn generate_piece_moves(
    game_state: &GameState,
    kind: PieceKind,
    attacks: impl Fn(Square, u64) -> u64,
    out: &mut Vec<ChessMove>,
) {
    let side = game_state.side_to_move();
    let own_occ = game_state.occupancy(side);

    for from in SquareIter::new(game_state.pieces_of(side, kind)) {
        let targets = attacks(from, game_state.occupancy_all()) & !own_occ;
        out.extend(SquareIter::new(targets).map(|to| ChessMove::new(from, to)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_knights_have_four_moves() {
        let game = GameState::new_game();
        let mut out = Vec::new();
        generate_knight_moves(&game, &mut out);
        assert_eq!(out.len(), 4);

        out.clear();
        generate_bishop_moves(&game, &mut out);
        generate_rook_moves(&game, &mut out);
        generate_queen_moves(&game, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn slider_captures_enemy_but_not_own_piece() {
        let game =
            GameState::from_fen("4k3/8/8/8/p7/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_rook_moves(&game, &mut out);
        // a2, a3, a4 (capture), b1, c1, d1
        assert_eq!(out.len(), 6);
        assert!(out.iter().any(|m| m.to.to_string() == "a4"));
        assert!(!out.iter().any(|m| m.to.to_string() == "a5"));
    }
}
