//! Opponent move selection.
//!
//! A `MovePolicy` picks one move from the legal list the session hands it.
//! The default picks uniformly at random; tests substitute deterministic
//! policies.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game_state::game_state::GameState;
use crate::moves::move_description::ChessMove;

pub trait MovePolicy: Send {
    fn name(&self) -> &str;

    /// Chooses one of `legal_moves`, which is never empty.
    fn choose_move(&mut self, game_state: &GameState, legal_moves: &[ChessMove]) -> Option<ChessMove>;
}

/// Uniformly random choice over the legal moves.
pub struct RandomMovePolicy {
    rng: StdRng,
}

impl RandomMovePolicy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence of choices for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMovePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl MovePolicy for RandomMovePolicy {
    fn name(&self) -> &str {
        "uniform random"
    }

    fn choose_move(&mut self, _game_state: &GameState, legal_moves: &[ChessMove]) -> Option<ChessMove> {
        legal_moves.choose(&mut self.rng).copied()
    }
}

/// Adapts a closure into a policy.
pub struct FnMovePolicy<F> {
    name: String,
    choose: F,
}

impl<F> FnMovePolicy<F>
where
    F: FnMut(&GameState, &[ChessMove]) -> Option<ChessMove> + Send,
{
    pub fn new(name: impl Into<String>, choose: F) -> Self {
        Self {
            name: name.into(),
            choose,
        }
    }
}

impl<F> MovePolicy for FnMovePolicy<F>
where
    F: FnMut(&GameState, &[ChessMove]) -> Option<ChessMove> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, game_state: &GameState, legal_moves: &[ChessMove]) -> Option<ChessMove> {
        (self.choose)(game_state, legal_moves)
    }
}
