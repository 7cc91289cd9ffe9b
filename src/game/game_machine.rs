//! Game state machine: the sole owner and mutator of the current board.
//!
//! `GameMachine` keeps the starting board and a [`GameRecord`] of every ply
//! applied since. The current board is the last recorded one, so undo is a pop
//! and status can compare the position keys stored with every ply for repetition
//! checks.

use tracing::{debug, info, instrument};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game::game_record::{GameRecord, RecordEntry};
use crate::game::game_status::{evaluate_status_by_keys, GameStatus};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{legal_moves, LegalMoveGenerator};
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_description::ChessMove;

#[derive(Debug, Clone)]
pub struct GameMachine {
    initial: GameState,
    initial_key: String,
    record: GameRecord,
}

impl Default for GameMachine {
    fn default() -> Self {
        Self::new(GameState::new_game())
    }
}

impl GameMachine {
    pub fn new(initial: GameState) -> Self {
        Self {
            initial_key: initial.position_key(),
            initial,
            record: GameRecord::new(),
        }
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self::new(GameState::from_fen(fen)?))
    }

    /// Current board.
    #[inline]
    pub fn board(&self) -> &GameState {
        self.record
            .last()
            .map(|entry| &entry.board)
            .unwrap_or(&self.initial)
    }

    #[inline]
    pub fn initial_board(&self) -> &GameState {
        &self.initial
    }

    #[inline]
    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn legal_moves(&self) -> ChessResult<Vec<ChessMove>> {
        Ok(legal_moves(self.board())?)
    }

    pub fn is_in_check(&self) -> bool {
        let board = self.board();
        is_king_in_check(board, board.side_to_move())
    }

    pub fn status(&self) -> ChessResult<GameStatus> {
        // every recorded position except the current one
        let count = self.record.len();
        let previous = std::iter::once(self.initial_key.as_str())
            .chain(self.record.position_keys())
            .take(count);
        Ok(evaluate_status_by_keys(self.board(), previous)?)
    }

    /// Applies `chess_move` if it is legal in the current position.
    ///
    /// The move is matched on origin, destination and promotion; the recorded
    /// move carries the generator's flags.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, chess_move: ChessMove) -> ChessResult<&GameState> {
        let status = self.status()?;
        if status.is_terminal() {
            return Err(ChessError::GameOver { status });
        }

        let generated = LegalMoveGenerator
            .generate_legal_moves(self.board())?
            .into_iter()
            .find(|g| {
                g.chess_move
                    .matches(chess_move.from, chess_move.to, chess_move.promotion)
            })
            .ok_or_else(|| ChessError::IllegalMove {
                notation: chess_move.to_string(),
            })?;

        debug!(fen = %generated.game_after_move.get_fen(), "applied move");
        self.record
            .push(generated.chess_move, generated.game_after_move);

        let status = self.status()?;
        if status.is_terminal() {
            info!(%status, "game reached a terminal state");
        }

        Ok(self.board())
    }

    /// Pops the last ply and restores the board before it.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> ChessResult<RecordEntry> {
        let entry = self.record.pop().ok_or(ChessError::NoHistory)?;
        debug!(chess_move = %entry.chess_move, "undid move");
        Ok(entry)
    }
}
