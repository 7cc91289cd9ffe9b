//! Stateless engine surface for presentation layers.
//!
//! Every function takes a board snapshot and returns a new value; nothing here
//! keeps state between calls. Sessions build on the same pieces.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game::game_status::{evaluate_status, GameStatus};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_description::ChessMove;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

pub fn new_game() -> GameState {
    GameState::new_game()
}

pub fn legal_moves(board: &GameState) -> ChessResult<Vec<ChessMove>> {
    Ok(crate::move_generation::legal_move_generator::legal_moves(board)?)
}

/// Applies `chess_move` to `board`, matching on origin, destination and
/// promotion. The input board is left untouched.
pub fn apply(board: &GameState, chess_move: ChessMove) -> ChessResult<GameState> {
    LegalMoveGenerator
        .generate_legal_moves(board)?
        .into_iter()
        .find(|g| {
            g.chess_move
                .matches(chess_move.from, chess_move.to, chess_move.promotion)
        })
        .map(|g| g.game_after_move)
        .ok_or_else(|| ChessError::IllegalMove {
            notation: chess_move.to_string(),
        })
}

/// Status of `board`, given every board that preceded it in the game.
pub fn status(board: &GameState, history: &[GameState]) -> ChessResult<GameStatus> {
    Ok(evaluate_status(board, history)?)
}

pub fn serialize(board: &GameState) -> String {
    generate_fen(board)
}

pub fn parse(fen: &str) -> ChessResult<GameState> {
    Ok(parse_fen(fen)?)
}
