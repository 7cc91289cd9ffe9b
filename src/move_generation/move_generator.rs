use crate::chess_errors::ChessError;
use crate::game_state::game_state::GameState;
use crate::moves::move_description::ChessMove;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

/// Raised when a snapshot violates board invariants the generator relies on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveGenerationError {
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

impl From<MoveGenerationError> for ChessError {
    fn from(err: MoveGenerationError) -> Self {
        match err {
            MoveGenerationError::InvalidState(msg) => ChessError::InvalidState(msg),
        }
    }
}

/// A legal move together with the board it produces.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub chess_move: ChessMove,
    pub game_after_move: GameState,
}

pub trait MoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>>;
}
