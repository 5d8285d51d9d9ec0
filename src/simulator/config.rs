//! Simulation configuration.

use crate::core::config::GameConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of sessions to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Cash out once the chance that the next draw is a lethal bomb exceeds this
    pub risk_threshold: f64,

    /// Safety cap on player actions per session
    pub max_actions_per_run: u32,

    /// Balance under test
    pub game: GameConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            risk_threshold: 0.25,
            max_actions_per_run: 10_000,
            game: GameConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch for quick checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 100,
            seed: Some(seed),
            verbosity: 0,
            ..Default::default()
        }
    }

    /// A player that never cashes out early.
    pub fn reckless(num_runs: u32) -> Self {
        Self {
            num_runs,
            risk_threshold: 1.0,
            ..Default::default()
        }
    }
}
