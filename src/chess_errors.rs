//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by the game machine and
//! session layers. Notation parsing reports a more specific `ParseError`,
//! which converts into `ChessError::Parse` with `?`.
//!
//! Every variant is a local, recoverable condition. Callers decide how to
//! present them; the engine only reports which rule was violated.

use crate::game::game_status::GameStatus;
use crate::game_state::chess_types::{Color, Square};

/// Malformed position, square or move text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected 6 FEN fields, found {found}")]
    FieldCount { found: usize },

    #[error("board layout must contain 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("rank {rank} covers {files} files instead of 8")]
    RankWidth { rank: u8, files: usize },

    #[error("invalid piece character '{0}' in board layout")]
    InvalidPiece(char),

    #[error("invalid side-to-move field: {0}")]
    InvalidSideToMove(String),

    #[error("invalid castling rights field: {0}")]
    InvalidCastling(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("en-passant square {0} is not on the rank behind a double-pushed pawn")]
    InvalidEnPassant(String),

    #[error("invalid {field}: {value}")]
    InvalidCounter { field: &'static str, value: String },

    #[error("{color} must have exactly one king, found {found}")]
    KingCount { color: Color, found: u32 },

    #[error("{color} has {found} pieces, more than 16")]
    TooManyPieces { color: Color, found: u32 },

    #[error("{color} is in check but it is not {color}'s move")]
    OpponentInCheck { color: Color },

    #[error("invalid move notation: {0}")]
    InvalidMove(String),

    #[error("invalid PGN: {0}")]
    InvalidPgn(String),
}

/// Unified error type for game and session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The requested move is not in the legal set for the current position.
    #[error("illegal move: {notation}")]
    IllegalMove { notation: String },

    /// A pawn move to the last rank was requested without a promotion kind.
    #[error("move {from}{to} requires a promotion piece")]
    PromotionRequired { from: Square, to: Square },

    /// Mutation attempted on a terminal position.
    #[error("game is over: {status}")]
    GameOver { status: GameStatus },

    /// Undo or redo with nothing to pop.
    #[error("no move history to step through")]
    NoHistory,

    /// Opponent move requested while the game is over.
    #[error("no legal moves available: {status}")]
    NoLegalMoves { status: GameStatus },

    /// Board invariants broken; indicates a corrupt snapshot.
    #[error("invalid game state: {0}")]
    InvalidState(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
