//! Coordinate move notation: `e2e4`, `e7e8=Q`.
//!
//! Parsing yields a bare move (no flags); it is resolved against a position by
//! matching origin, destination and promotion against the legal move list.

use crate::chess_errors::ParseError;
use crate::game_state::chess_types::PieceKind;
use crate::moves::move_description::ChessMove;
use crate::utils::algebraic::algebraic_to_square;

pub fn format_move(chess_move: &ChessMove) -> String {
    let mut out = format!("{}{}", chess_move.from, chess_move.to);
    if let Some(promotion) = chess_move.promotion {
        out.push('=');
        out.push(promotion.letter());
    }
    out
}

/// Parses `{from}{to}` with an optional `={Q|R|B|N}` suffix. The promotion
/// letter may also be lowercase, with or without the `=`.
pub fn parse_move(text: &str) -> Result<ChessMove, ParseError> {
    let invalid = || ParseError::InvalidMove(text.to_owned());
    let text = text.trim();
    if !text.is_ascii() || text.len() < 4 {
        return Err(invalid());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| invalid())?;
    let chess_move = ChessMove::new(from, to);

    let suffix = &text[4..];
    let letter = match suffix.strip_prefix('=').unwrap_or(suffix) {
        "" if suffix.is_empty() => return Ok(chess_move),
        rest if rest.len() == 1 => rest.chars().next().ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };

    match PieceKind::from_letter(letter) {
        Some(kind) if kind.is_promotion_target() => Ok(chess_move.with_promotion(kind)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_move, parse_move};
    use crate::chess_errors::ParseError;
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn formats_plain_and_promotion_moves() {
        let plain = parse_move("e2e4").expect("move should parse");
        assert_eq!(format_move(&plain), "e2e4");

        let promo = parse_move("e7e8=Q").expect("promotion should parse");
        assert_eq!(promo.promotion, Some(PieceKind::Queen));
        assert_eq!(promo.to_string(), "e7e8=Q");
    }

    #[test]
    fn accepts_lowercase_and_bare_promotion_letters() {
        for text in ["a2a1=n", "a2a1n", "a2a1N"] {
            let mv = parse_move(text).expect("promotion should parse");
            assert_eq!(mv.promotion, Some(PieceKind::Knight), "{text}");
            assert_eq!(mv.to_string(), "a2a1=N");
        }
    }

    #[test]
    fn rejects_malformed_moves() {
        for bad in ["", "e2", "e2e9", "e2e4=", "e7e8=K", "e7e8=P", "e7e8=QQ", "e2-e4", "é2e4"] {
            assert_eq!(
                parse_move(bad),
                Err(ParseError::InvalidMove(bad.to_owned())),
                "{bad}"
            );
        }
    }
}
