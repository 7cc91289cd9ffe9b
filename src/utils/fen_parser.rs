//! FEN-to-GameState parser.
//!
//! Builds a board snapshot from a Forsyth-Edwards Notation string, checking
//! field structure, piece letters, coordinates, counters, the per-side
//! king/piece-count invariants and that the position could arise in play
//! (consistent en-passant target, side not to move not in check).

use crate::chess_errors::ParseError;
use crate::game_state::chess_rules::MAX_PIECES_PER_SIDE;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, ParseError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    let [board_part, side_part, castling_part, en_passant_part, halfmove_part, fullmove_part] =
        parts[..]
    else {
        return Err(ParseError::FieldCount { found: parts.len() });
    };

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part, &game_state)?;
    game_state.halfmove_clock = parse_counter(halfmove_part, "halfmove clock")?;
    game_state.fullmove_number = parse_counter(fullmove_part, "fullmove number")?;
    if game_state.fullmove_number == 0 {
        return Err(ParseError::InvalidCounter {
            field: "fullmove number",
            value: fullmove_part.to_owned(),
        });
    }

    validate_material(&game_state)?;

    let waiting = game_state.side_to_move.opposite();
    if is_king_in_check(&game_state, waiting) {
        return Err(ParseError::OpponentInCheck { color: waiting });
    }

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), ParseError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ParseError::RankCount { found: ranks.len() });
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ParseError::InvalidPiece(ch));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(ParseError::InvalidPiece(ch))?;
            let square = Square::new(file as u8, board_rank).ok_or(ParseError::RankWidth {
                rank: board_rank + 1,
                files: file + 1,
            })?;
            game_state.place_piece(square, piece);
            file += 1;
        }

        if file != 8 {
            return Err(ParseError::RankWidth {
                rank: board_rank + 1,
                files: file,
            });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ParseError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ParseError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ParseError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        let flag = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(ParseError::InvalidCastling(castling_part.to_owned())),
        };
        if rights & flag != 0 {
            return Err(ParseError::InvalidCastling(castling_part.to_owned()));
        }
        rights |= flag;
    }

    Ok(rights)
}

/// The target must be the empty square a pawn of the side that just moved
/// skipped: that pawn stands in front of it and its start square is empty.
fn parse_en_passant_square(
    en_passant_part: &str,
    game_state: &GameState,
) -> Result<Option<Square>, ParseError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    let invalid = || ParseError::InvalidEnPassant(en_passant_part.to_owned());

    let pusher = game_state.side_to_move.opposite();
    let expected_rank = match pusher {
        Color::White => 2,
        Color::Black => 5,
    };
    if square.rank() != expected_rank || game_state.piece_at(square).is_some() {
        return Err(invalid());
    }

    let pushed_to = square.offset(0, pusher.pawn_direction()).ok_or_else(invalid)?;
    let pushed_from = square.offset(0, -pusher.pawn_direction()).ok_or_else(invalid)?;
    if game_state.piece_at(pushed_to) != Some(Piece::new(pusher, PieceKind::Pawn))
        || game_state.piece_at(pushed_from).is_some()
    {
        return Err(invalid());
    }

    Ok(Some(square))
}

fn parse_counter(part: &str, field: &'static str) -> Result<u16, ParseError> {
    part.parse::<u16>().map_err(|_| ParseError::InvalidCounter {
        field,
        value: part.to_owned(),
    })
}

fn validate_material(game_state: &GameState) -> Result<(), ParseError> {
    for color in Color::ALL {
        let kings = game_state.pieces_of(color, PieceKind::King).count_ones();
        if kings != 1 {
            return Err(ParseError::KingCount {
                color,
                found: kings,
            });
        }
        let count = game_state.piece_count(color);
        if count > MAX_PIECES_PER_SIDE {
            return Err(ParseError::TooManyPieces {
                color,
                found: count,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ParseError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move(), Color::White);
        assert_eq!(game_state.castling_rights(), CASTLE_ALL);
        assert_eq!(game_state.fullmove_number(), 1);
        assert_eq!(game_state.halfmove_clock(), 0);
        assert_eq!(game_state.occupancy_all().count_ones(), 32);
    }

    #[test]
    fn parse_en_passant_and_counters() {
        let game_state =
            parse_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2")
                .expect("FEN should parse");
        assert_eq!(game_state.en_passant_square().map(|s| s.to_string()), Some("e6".to_owned()));
        assert_eq!(game_state.fullmove_number(), 2);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/8 w - -"),
            Err(ParseError::FieldCount { found: 4 })
        );
        assert_eq!(
            parse_fen(&format!("{STARTING_POSITION_FEN} extra")),
            Err(ParseError::FieldCount { found: 7 })
        );
    }

    #[test]
    fn rejects_bad_tokens() {
        assert_eq!(
            parse_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(ParseError::InvalidPiece('x'))
        );
        assert!(matches!(
            parse_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(ParseError::RankWidth { rank: 7, files: 7 })
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(ParseError::InvalidPiece('9'))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1"),
            Err(ParseError::RankCount { found: 7 })
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(ParseError::InvalidSideToMove(_))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1"),
            Err(ParseError::InvalidCastling(_))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1"),
            Err(ParseError::InvalidSquare(_))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1"),
            Err(ParseError::InvalidEnPassant(_))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1"),
            Err(ParseError::InvalidCounter { field: "halfmove clock", .. })
        ));
    }

    #[test]
    fn en_passant_target_must_follow_a_double_push() {
        // target occupied by a knight
        assert_eq!(
            parse_fen("4k3/8/4N3/3Pp3/8/8/8/4K3 w - e6 0 1"),
            Err(ParseError::InvalidEnPassant("e6".to_owned()))
        );
        // no pawn in front of the target
        assert_eq!(
            parse_fen("4k3/8/8/3P4/8/8/8/4K3 w - e6 7 1"),
            Err(ParseError::InvalidEnPassant("e6".to_owned()))
        );
        // the pawn's start square is still occupied
        assert_eq!(
            parse_fen("4k3/4p3/8/3Pp3/8/8/8/4K3 w - e6 0 1"),
            Err(ParseError::InvalidEnPassant("e6".to_owned()))
        );
        // a white pawn in front of the target does not count
        assert_eq!(
            parse_fen("4k3/8/8/3PP3/8/8/8/4K3 w - e6 0 1"),
            Err(ParseError::InvalidEnPassant("e6".to_owned()))
        );

        let black_to_move = parse_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1")
            .expect("target behind a white double push should parse");
        assert_eq!(
            black_to_move.en_passant_square().map(|s| s.to_string()),
            Some("e3".to_owned())
        );
    }

    #[test]
    fn rejects_side_not_to_move_in_check() {
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 0 1"),
            Err(ParseError::OpponentInCheck {
                color: Color::Black
            })
        );
        // the side to move may be in check
        assert!(parse_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1").is_ok());
    }

    #[test]
    fn rejects_missing_or_extra_kings() {
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ParseError::KingCount {
                color: Color::Black,
                found: 0
            })
        );
        assert_eq!(
            parse_fen("k7/8/8/8/8/8/8/K3K3 w - - 0 1"),
            Err(ParseError::KingCount {
                color: Color::White,
                found: 2
            })
        );
    }

    #[test]
    fn rejects_more_than_sixteen_pieces() {
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/P7/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(ParseError::TooManyPieces { color: Color::White, found: 17 })
        ));
    }
}
