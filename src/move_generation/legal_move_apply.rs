//! Board transition for a single move.
//!
//! `apply_move` performs the move on a copy of the board without checking
//! legality; the generator filters out moves that leave the mover's king in
//! check afterwards.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_moves_king::castling_rook_squares;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::move_description::ChessMove;

pub fn apply_move(game_state: &GameState, chess_move: ChessMove) -> MoveGenResult<GameState> {
    let ChessMove { from, to, .. } = chess_move;
    let moving_color = game_state.side_to_move();

    let moved = game_state.piece_at(from).ok_or_else(|| {
        MoveGenerationError::InvalidState(format!("no piece on from-square {from}"))
    })?;
    if moved.color != moving_color {
        return Err(MoveGenerationError::InvalidState(format!(
            "piece on {from} does not belong to {moving_color}"
        )));
    }

    let mut next = game_state.clone();
    next.clear_square(from);

    // En passant removes the pawn beside the destination, not on it.
    let captured = if chess_move.is_en_passant() {
        let capture_sq = to.offset(0, -moving_color.pawn_direction()).ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("invalid en-passant target {to}"))
        })?;
        if next.piece_at(to).is_some()
            || next.piece_at(capture_sq) != Some(Piece::new(moving_color.opposite(), PieceKind::Pawn))
        {
            return Err(MoveGenerationError::InvalidState(format!(
                "en-passant {from}{to} has no pawn to capture on {capture_sq}"
            )));
        }
        next.clear_square(capture_sq)
    } else {
        next.clear_square(to)
    };

    if let Some(captured) = captured {
        if captured.color == moving_color {
            return Err(MoveGenerationError::InvalidState(format!(
                "{from}{to} captures its own piece"
            )));
        }
    }

    let placed_kind = match chess_move.promotion {
        Some(kind) if moved.kind == PieceKind::Pawn && kind.is_promotion_target() => kind,
        Some(kind) => {
            return Err(MoveGenerationError::InvalidState(format!(
                "{:?} cannot promote to {kind:?}",
                moved.kind
            )))
        }
        None => moved.kind,
    };
    next.place_piece(to, Piece::new(moving_color, placed_kind));

    if chess_move.is_castling() && moved.kind == PieceKind::King {
        let (rook_from, rook_to) = castling_rook_squares(to).ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("invalid castling destination {to}"))
        })?;
        let rook = next.clear_square(rook_from).ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("no rook on {rook_from} to castle with"))
        })?;
        next.place_piece(rook_to, rook);
    }

    // Rights are only ever revoked: a king move drops both, and any move
    // from or onto a corner drops that corner's right for good.
    if moved.kind == PieceKind::King {
        next.castling_rights &= !castling_rights_of(moving_color);
    }
    next.castling_rights &= !(castling_right_for_corner(from) | castling_right_for_corner(to));

    next.en_passant_square = if chess_move.is_double_pawn_push() {
        from.offset(0, moving_color.pawn_direction())
    } else {
        None
    };

    if moved.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = moving_color.opposite();

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::apply_move;
    use crate::game_state::{chess_types::*, game_state::GameState};
    use crate::moves::move_description::{ChessMove, FLAG_CASTLING, FLAG_EN_PASSANT};
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn castling_moves_king_and_rook() {
        let game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").expect("FEN should parse");
        let next = apply_move(
            &game,
            ChessMove::new(Square::E1, Square::G1).with_flags(FLAG_CASTLING),
        )
        .expect("castle should apply");

        assert_eq!(next.get_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 4 10");
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let game =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let next = apply_move(
            &game,
            ChessMove::new(sq("e5"), sq("d6")).with_flags(FLAG_EN_PASSANT),
        )
        .expect("en passant should apply");

        assert_eq!(next.piece_at(sq("d5")), None);
        assert_eq!(
            next.piece_at(sq("d6")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(next.piece_count(Color::Black), 1);
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn en_passant_onto_occupied_square_is_an_error() {
        let mut game =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        game.place_piece(sq("d6"), Piece::new(Color::Black, PieceKind::Knight));
        let result = apply_move(
            &game,
            ChessMove::new(sq("e5"), sq("d6")).with_flags(FLAG_EN_PASSANT),
        );
        assert!(result.is_err());
    }

    #[test]
    fn promotion_replaces_pawn() {
        let game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 5 30").expect("FEN should parse");
        let next = apply_move(
            &game,
            ChessMove::new(sq("a7"), sq("a8")).with_promotion(PieceKind::Knight),
        )
        .expect("promotion should apply");

        assert_eq!(
            next.piece_at(sq("a8")),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        assert_eq!(next.pieces_of(Color::White, PieceKind::Pawn), 0);
    }

    #[test]
    fn capturing_on_corner_revokes_right() {
        let game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let next = apply_move(&game, ChessMove::new(Square::A1, Square::A8))
            .expect("rook capture should apply");
        assert_eq!(next.castling_rights(), CASTLE_WHITE_KINGSIDE | CASTLE_BLACK_KINGSIDE);
    }

    #[test]
    fn moving_from_empty_square_is_an_error() {
        let game = GameState::new_game();
        assert!(apply_move(&game, ChessMove::new(sq("e4"), sq("e5"))).is_err());
        assert!(apply_move(&game, ChessMove::new(sq("e7"), sq("e5"))).is_err());
    }
}
