//! Session controller.
//!
//! A `GameSession` is an owned value: it holds the game machine (and through it
//! the move record), a redo stack, and the policy that plays the opponent.
//! Hosts that share a session across threads wrap it in their own lock.

use tracing::{debug, info, instrument, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game::game_machine::GameMachine;
use crate::game::game_record::GameRecord;
use crate::game::game_status::GameStatus;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::moves::move_description::ChessMove;
use crate::session::move_policy::{MovePolicy, RandomMovePolicy};
use crate::session::session_config::SessionConfig;
use crate::utils::move_notation::parse_move;
use crate::utils::pgn::write_pgn;

pub struct GameSession {
    machine: GameMachine,
    start: GameState,
    redo_stack: Vec<ChessMove>,
    policy: Box<dyn MovePolicy>,
    config: SessionConfig,
}

impl GameSession {
    /// Standard start position against a uniformly random opponent.
    pub fn new() -> Self {
        Self::with_policy(RandomMovePolicy::new())
    }

    pub fn with_policy(policy: impl MovePolicy + 'static) -> Self {
        let start = GameState::new_game();
        Self {
            machine: GameMachine::new(start.clone()),
            start,
            redo_stack: Vec::new(),
            policy: Box::new(policy),
            config: SessionConfig::default(),
        }
    }

    /// Session starting from `config.start_fen`, playing with `policy`.
    pub fn with_config(config: SessionConfig, policy: Box<dyn MovePolicy>) -> ChessResult<Self> {
        let start = config.start_position()?;
        info!(fen = %start.get_fen(), policy = policy.name(), "session created");
        Ok(Self {
            machine: GameMachine::new(start.clone()),
            start,
            redo_stack: Vec::new(),
            policy,
            config,
        })
    }

    /// Random opponent, seeded from `config.rng_seed` when present.
    pub fn from_config(config: SessionConfig) -> ChessResult<Self> {
        let policy = match config.rng_seed {
            Some(seed) => RandomMovePolicy::with_seed(seed),
            None => RandomMovePolicy::new(),
        };
        Self::with_config(config, Box::new(policy))
    }

    #[inline]
    pub fn board(&self) -> &GameState {
        self.machine.board()
    }

    #[inline]
    pub fn record(&self) -> &GameRecord {
        self.machine.record()
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    pub fn history(&self) -> Vec<ChessMove> {
        self.machine.record().moves().collect()
    }

    pub fn status(&self) -> ChessResult<GameStatus> {
        self.machine.status()
    }

    pub fn is_in_check(&self) -> bool {
        self.machine.is_in_check()
    }

    pub fn legal_moves(&self) -> ChessResult<Vec<ChessMove>> {
        self.machine.legal_moves()
    }

    /// Squares the piece on `from` may move to. Promotions to several kinds
    /// collapse into one destination.
    pub fn legal_destinations(&self, from: Square) -> ChessResult<Vec<Square>> {
        let mut destinations: Vec<Square> = self
            .legal_moves()?
            .into_iter()
            .filter(|m| m.from == from)
            .map(|m| m.to)
            .collect();
        destinations.sort_unstable_by_key(|sq| sq.index());
        destinations.dedup();
        Ok(destinations)
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Applies the player's move and returns the resulting board.
    #[instrument(skip(self))]
    pub fn make_player_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<GameState> {
        let status = self.status()?;
        if status.is_terminal() {
            return Err(ChessError::GameOver { status });
        }

        if promotion.is_none()
            && self
                .legal_moves()?
                .iter()
                .any(|m| m.from == from && m.to == to && m.promotion.is_some())
        {
            return Err(ChessError::PromotionRequired { from, to });
        }

        let mut chess_move = ChessMove::new(from, to);
        if let Some(kind) = promotion {
            chess_move = chess_move.with_promotion(kind);
        }
        self.play(chess_move)
    }

    /// Same as [`Self::make_player_move`], taking `e2e4` / `e7e8=Q` text.
    pub fn make_player_move_notation(&mut self, notation: &str) -> ChessResult<GameState> {
        let chess_move = parse_move(notation)?;
        self.make_player_move(chess_move.from, chess_move.to, chess_move.promotion)
    }

    /// Lets the policy pick and play a move for the side to move.
    #[instrument(skip(self), fields(policy = self.policy.name()))]
    pub fn request_opponent_move(&mut self) -> ChessResult<ChessMove> {
        let status = self.status()?;
        if status.is_terminal() {
            return Err(ChessError::NoLegalMoves { status });
        }

        let legal_moves = self.legal_moves()?;
        let chosen = self
            .policy
            .choose_move(self.machine.board(), &legal_moves)
            .ok_or_else(|| {
                ChessError::InvalidState(format!(
                    "policy '{}' returned no move from {} legal moves",
                    self.policy.name(),
                    legal_moves.len()
                ))
            })?;

        self.play(chosen)?;
        let played = self
            .machine
            .record()
            .last()
            .map(|entry| entry.chess_move)
            .ok_or_else(|| ChessError::InvalidState("record empty after move".to_owned()))?;
        debug!(chess_move = %played, "opponent moved");
        Ok(played)
    }

    /// Takes back one ply and returns the move that was undone.
    #[instrument(skip(self))]
    pub fn undo_last_ply(&mut self) -> ChessResult<ChessMove> {
        let entry = self.machine.undo()?;
        self.redo_stack.push(entry.chess_move);
        Ok(entry.chess_move)
    }

    /// Takes back two plies, or one when only one has been played. Returns the
    /// undone moves, most recent first.
    #[instrument(skip(self))]
    pub fn undo_last_full_turn(&mut self) -> ChessResult<Vec<ChessMove>> {
        let mut undone = vec![self.undo_last_ply()?];
        if !self.record().is_empty() {
            undone.push(self.undo_last_ply()?);
        }
        Ok(undone)
    }

    /// Replays the most recently undone ply.
    #[instrument(skip(self))]
    pub fn redo(&mut self) -> ChessResult<ChessMove> {
        let chess_move = self.redo_stack.pop().ok_or(ChessError::NoHistory)?;
        if let Err(err) = self.machine.apply_move(chess_move) {
            warn!(%err, chess_move = %chess_move, "redo failed");
            self.redo_stack.push(chess_move);
            return Err(err);
        }
        Ok(chess_move)
    }

    /// Discards all history and returns to the configured start position.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.machine = GameMachine::new(self.start.clone());
        self.redo_stack.clear();
        info!(fen = %self.start.get_fen(), "session reset");
    }

    /// Exports the game so far as PGN.
    pub fn to_pgn(&self) -> ChessResult<String> {
        Ok(write_pgn(
            self.machine.initial_board(),
            &self.history(),
            self.status()?,
        ))
    }

    fn play(&mut self, chess_move: ChessMove) -> ChessResult<GameState> {
        let board = self.machine.apply_move(chess_move)?.clone();
        self.redo_stack.clear();
        Ok(board)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
