//! Session configuration: random seed and AI reply delay.

use std::time::Duration;

use crate::constants::AI_REPLY_DELAY_MS;

/// Session settings shared by the protocol loop and the demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for the random source; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Wait between a player move and the AI reply.
    pub ai_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ai_delay: Duration::from_millis(AI_REPLY_DELAY_MS),
        }
    }
}

impl GameConfig {
    pub fn new(seed: Option<u64>, ai_delay_ms: u64) -> Self {
        Self {
            seed,
            ai_delay: Duration::from_millis(ai_delay_ms),
        }
    }

    /// Random source for a new game under this config.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}
