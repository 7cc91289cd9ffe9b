//! Session configuration.
//!
//! Defaults give a standard game against an unseeded random opponent. Hosts
//! may override them through environment variables:
//!
//! - `CHESS_SESSION_FEN`: starting position
//! - `CHESS_SESSION_SEED`: seed for the random opponent
//! - `CHESS_SESSION_DELAY_MS`: pause before the opponent replies (front ends only)

use std::time::Duration;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;

pub const ENV_START_FEN: &str = "CHESS_SESSION_FEN";
pub const ENV_RNG_SEED: &str = "CHESS_SESSION_SEED";
pub const ENV_OPPONENT_DELAY_MS: &str = "CHESS_SESSION_DELAY_MS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub start_fen: Option<String>,
    pub rng_seed: Option<u64>,
    /// Presentation pacing only; the engine never sleeps.
    pub opponent_delay: Duration,
}

impl SessionConfig {
    pub fn from_env() -> ChessResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so callers and tests need not
    /// touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ChessResult<Self> {
        let mut config = Self::default();

        if let Some(fen) = lookup(ENV_START_FEN).filter(|v| !v.trim().is_empty()) {
            config.start_fen = Some(fen.trim().to_owned());
        }

        if let Some(seed) = lookup(ENV_RNG_SEED) {
            let seed = seed
                .trim()
                .parse::<u64>()
                .map_err(|_| ChessError::Config(format!("{ENV_RNG_SEED}={seed} is not a u64")))?;
            config.rng_seed = Some(seed);
        }

        if let Some(delay) = lookup(ENV_OPPONENT_DELAY_MS) {
            let millis = delay.trim().parse::<u64>().map_err(|_| {
                ChessError::Config(format!("{ENV_OPPONENT_DELAY_MS}={delay} is not a u64"))
            })?;
            config.opponent_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Board the session starts from and resets to.
    pub fn start_position(&self) -> ChessResult<GameState> {
        match &self.start_fen {
            Some(fen) => Ok(GameState::from_fen(fen)?),
            None => Ok(GameState::new_game()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = SessionConfig::from_lookup(lookup(&[])).expect("config should load");
        assert_eq!(config, SessionConfig::default());
        assert_eq!(
            config.start_position().expect("start position"),
            GameState::new_game()
        );
    }

    #[test]
    fn reads_all_keys() {
        let config = SessionConfig::from_lookup(lookup(&[
            (ENV_START_FEN, "4k3/8/8/8/8/8/8/4K2R w K - 0 1"),
            (ENV_RNG_SEED, "99"),
            (ENV_OPPONENT_DELAY_MS, "250"),
        ]))
        .expect("config should load");
        assert_eq!(config.rng_seed, Some(99));
        assert_eq!(config.opponent_delay, Duration::from_millis(250));
        assert_eq!(
            config.start_position().expect("start position").get_fen(),
            "4k3/8/8/8/8/8/8/4K2R w K - 0 1"
        );
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = SessionConfig::from_lookup(lookup(&[(ENV_RNG_SEED, "abc")]))
            .expect_err("bad seed must fail");
        assert!(matches!(err, ChessError::Config(_)));

        let config = SessionConfig::from_lookup(lookup(&[(ENV_START_FEN, "not a fen")]))
            .expect("FEN is validated lazily");
        assert!(matches!(config.start_position(), Err(ChessError::Parse(_))));
    }
}
