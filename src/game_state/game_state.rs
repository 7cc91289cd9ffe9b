//! Board snapshot representation.
//!
//! `GameState` is the central model for the engine: piece bitboards, occupancy
//! caches, side to move, castling rights, en-passant target and clocks. A
//! snapshot never changes once published; move application builds a new one.

use crate::chess_errors::ParseError;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::{generate_fen, generate_position_key};
use crate::utils::fen_parser::parse_fen;

/// Immutable-per-ply board snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    // [color][piece_kind]
    pub(crate) pieces: [[u64; 6]; 2],

    pub(crate) occupancy_by_color: [u64; 2],
    pub(crate) occupancy_all: u64,

    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    /// Board with no pieces, white to move.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ParseError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// FEN without the clocks; equal keys mean the same position for
    /// repetition purposes.
    #[inline]
    pub fn position_key(&self) -> String {
        generate_position_key(self)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.bit();
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in Color::ALL {
            if self.occupancy_by_color[color.index()] & mask == 0 {
                continue;
            }
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Bitboard of `color`'s pieces of `kind`.
    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy_all
    }

    #[inline]
    pub fn piece_count(&self, color: Color) -> u32 {
        self.occupancy(color).count_ones()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        SquareIter::new(self.pieces_of(color, PieceKind::King)).next()
    }

    pub(crate) fn place_piece(&mut self, square: Square, piece: Piece) {
        let mask = square.bit();
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    /// Empties `square`, returning whatever stood there.
    pub(crate) fn clear_square(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        let mask = !square.bit();
        self.pieces[piece.color.index()][piece.kind.index()] &= mask;
        self.occupancy_by_color[piece.color.index()] &= mask;
        self.occupancy_all &= mask;
        Some(piece)
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_has_standard_layout() {
        let game = GameState::new_game();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.castling_rights(), CASTLE_ALL);
        assert_eq!(game.en_passant_square(), None);
        assert_eq!(game.piece_count(Color::White), 16);
        assert_eq!(game.piece_count(Color::Black), 16);
        assert_eq!(
            game.piece_at(Square::E1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            game.piece_at(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(game.piece_at(Square::new(4, 3).expect("e4")), None);
        assert_eq!(game.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn place_and_clear_keep_occupancy_in_sync() {
        let mut game = GameState::new_empty();
        let rook = Piece::new(Color::Black, PieceKind::Rook);
        game.place_piece(Square::A8, rook);
        assert_eq!(game.occupancy_all(), Square::A8.bit());
        assert_eq!(game.occupancy(Color::Black), Square::A8.bit());

        assert_eq!(game.clear_square(Square::A8), Some(rook));
        assert_eq!(game.clear_square(Square::A8), None);
        assert_eq!(game.occupancy_all(), 0);
        assert_eq!(game, GameState::new_empty());
    }

    #[test]
    fn position_key_ignores_clocks() {
        let a = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 12 40").expect("FEN should parse");
        assert_ne!(a, b);
        assert_eq!(a.position_key(), b.position_key());
    }
}
