//! Pseudo-legal pawn moves: pushes, double pushes, captures, en passant and
//! promotions.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::move_description::{ChessMove, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

pub fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move();
    let enemy_occ = game_state.occupancy(side.opposite());
    let empty = !game_state.occupancy_all();
    let direction = side.pawn_direction();

    for from in SquareIter::new(game_state.pieces_of(side, PieceKind::Pawn)) {
        if let Some(to) = from.offset(0, direction) {
            if to.bit() & empty != 0 {
                push_pawn_move(side, ChessMove::new(from, to), out);

                if from.rank() == side.pawn_start_rank() {
                    if let Some(two_step) = from.offset(0, 2 * direction) {
                        if two_step.bit() & empty != 0 {
                            out.push(
                                ChessMove::new(from, two_step).with_flags(FLAG_DOUBLE_PAWN_PUSH),
                            );
                        }
                    }
                }
            }
        }

        for to in SquareIter::new(pawn_attacks(side, from)) {
            if to.bit() & enemy_occ != 0 {
                push_pawn_move(side, ChessMove::new(from, to), out);
            } else if to.bit() & empty != 0 && game_state.en_passant_square() == Some(to) {
                out.push(ChessMove::new(from, to).with_flags(FLAG_EN_PASSANT));
            }
        }
    }
}

/// Emits `base`, expanded into one move per promotion kind on the last rank.
fn push_pawn_move(side: Color, base: ChessMove, out: &mut Vec<ChessMove>) {
    if base.to.rank() == side.promotion_rank() {
        for promo in PieceKind::PROMOTIONS {
            out.push(base.with_promotion(promo));
        }
    } else {
        out.push(base);
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};
    use crate::game_state::game_state::GameState;
    use crate::moves::move_description::ChessMove;

    fn pawn_moves(fen: &str) -> Vec<ChessMove> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, &mut out);
        out
    }

    #[test]
    fn start_position_has_sixteen_pawn_moves() {
        let moves = pawn_moves(crate::game_state::chess_rules::STARTING_POSITION_FEN);
        assert_eq!(moves.len(), 16);
        assert_eq!(moves.iter().filter(|m| m.is_double_pawn_push()).count(), 8);
    }

    #[test]
    fn blocked_pawn_cannot_double_push() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(moves.is_empty());
    }

    #[test]
    fn promotion_expands_to_four_kinds() {
        let moves = pawn_moves("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        // a8 push and b8 capture, four kinds each
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.promotion.is_some()));
    }

    #[test]
    fn en_passant_never_targets_an_occupied_square() {
        let mut game =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let d6 = crate::utils::algebraic::algebraic_to_square("d6").expect("square");
        game.place_piece(d6, Piece::new(Color::Black, PieceKind::Knight));

        let mut out = Vec::new();
        generate_pawn_moves(&game, &mut out);
        assert!(out.iter().all(|m| !m.is_en_passant()));
        // the knight itself is an ordinary capture
        assert!(out.iter().any(|m| m.to == d6));
    }

    #[test]
    fn en_passant_only_onto_recorded_square() {
        let moves = pawn_moves("4k3/8/8/2pPp3/8/8/8/4K3 w - e6 0 1");
        let ep: Vec<_> = moves.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to.to_string(), "e6");
    }
}
