//! King steps and castling.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::attack_tables::king_attacks;
use crate::moves::move_description::{ChessMove, FLAG_CASTLING};

/// Geometry of one castling option.
struct CastlingLane {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    /// Squares between king and rook that must be empty.
    between: &'static [Square],
    /// Squares the king passes over or lands on; none may be attacked.
    king_path: &'static [Square],
}

const CASTLING_LANES: [CastlingLane; 4] = [
    CastlingLane {
        right: CASTLE_WHITE_KINGSIDE,
        king_from: Square::E1,
        king_to: Square::G1,
        rook_from: Square::H1,
        between: &[Square::F1, Square::G1],
        king_path: &[Square::F1, Square::G1],
    },
    CastlingLane {
        right: CASTLE_WHITE_QUEENSIDE,
        king_from: Square::E1,
        king_to: Square::C1,
        rook_from: Square::A1,
        between: &[Square::B1, Square::C1, Square::D1],
        king_path: &[Square::D1, Square::C1],
    },
    CastlingLane {
        right: CASTLE_BLACK_KINGSIDE,
        king_from: Square::E8,
        king_to: Square::G8,
        rook_from: Square::H8,
        between: &[Square::F8, Square::G8],
        king_path: &[Square::F8, Square::G8],
    },
    CastlingLane {
        right: CASTLE_BLACK_QUEENSIDE,
        king_from: Square::E8,
        king_to: Square::C8,
        rook_from: Square::A8,
        between: &[Square::B8, Square::C8, Square::D8],
        king_path: &[Square::D8, Square::C8],
    },
];

/// Rook relocation for a castling move that lands the king on `king_to`.
pub fn castling_rook_squares(king_to: Square) -> Option<(Square, Square)> {
    match king_to {
        Square::G1 => Some((Square::H1, Square::F1)),
        Square::C1 => Some((Square::A1, Square::D1)),
        Square::G8 => Some((Square::H8, Square::F8)),
        Square::C8 => Some((Square::A8, Square::D8)),
        _ => None,
    }
}

pub fn generate_king_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move();
    let Some(from) = game_state.king_square(side) else {
        return;
    };

    let targets = king_attacks(from) & !game_state.occupancy(side);
    out.extend(SquareIter::new(targets).map(|to| ChessMove::new(from, to)));

    generate_castling_moves(game_state, from, out);
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move();
    let enemy = side.opposite();
    let own_rook = Piece::new(side, PieceKind::Rook);

    for lane in CASTLING_LANES.iter() {
        if lane.king_from != king_from || !game_state.has_castling_right(lane.right) {
            continue;
        }
        if castling_rights_of(side) & lane.right == 0 {
            continue;
        }
        if game_state.piece_at(lane.rook_from) != Some(own_rook) {
            continue;
        }
        if lane
            .between
            .iter()
            .any(|sq| game_state.occupancy_all() & sq.bit() != 0)
        {
            continue;
        }
        // Cannot castle out of, through, or into check.
        if is_square_attacked(game_state, king_from, enemy)
            || lane
                .king_path
                .iter()
                .any(|&sq| is_square_attacked(game_state, sq, enemy))
        {
            continue;
        }

        out.push(ChessMove::new(king_from, lane.king_to).with_flags(FLAG_CASTLING));
    }
}
