//! Crate root module declarations for the chess session engine.
//!
//! This file exposes the board model, move generation, the game state
//! machine, the session controller and the notation utilities so the demo
//! binary, tests and hosting applications can import stable module paths.

pub mod chess_errors;
pub mod engine_api;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod attack_tables;
    pub mod move_description;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod legal_moves_pieces;
    pub mod move_generator;
    pub mod perft;
}

pub mod game {
    pub mod game_machine;
    pub mod game_record;
    pub mod game_status;
}

pub mod session {
    pub mod game_session;
    pub mod move_policy;
    pub mod session_config;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod move_notation;
    pub mod pgn;
    pub mod render_game_state;
}

pub use chess_errors::{ChessError, ChessResult, ParseError};
pub use game::game_machine::GameMachine;
pub use game::game_status::GameStatus;
pub use game_state::chess_types::{Color, Piece, PieceKind, Square};
pub use game_state::game_state::GameState;
pub use moves::move_description::ChessMove;
pub use session::game_session::GameSession;
pub use session::move_policy::{FnMovePolicy, MovePolicy, RandomMovePolicy};
pub use session::session_config::SessionConfig;
