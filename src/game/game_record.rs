//! Ordered move history of a game.

use crate::game_state::game_state::GameState;
use crate::moves::move_description::ChessMove;

/// One applied ply and the board it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub chess_move: ChessMove,
    pub board: GameState,
    /// `board.position_key()`, computed once when the ply is recorded.
    pub position_key: String,
}

/// Append-only history, truncated only by undo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    entries: Vec<RecordEntry>,
}

impl GameRecord {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&RecordEntry> {
        self.entries.last()
    }

    pub fn moves(&self) -> impl Iterator<Item = ChessMove> + '_ {
        self.entries.iter().map(|entry| entry.chess_move)
    }

    pub fn position_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.position_key.as_str())
    }

    pub(crate) fn push(&mut self, chess_move: ChessMove, board: GameState) {
        let position_key = board.position_key();
        self.entries.push(RecordEntry {
            chess_move,
            board,
            position_key,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<RecordEntry> {
        self.entries.pop()
    }
}
