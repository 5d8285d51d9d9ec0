//! Game balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of sessions with a simple push-your-luck policy to see
//! how far players get and whether the level costs pay for themselves.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{lethal_draw_chance, run_simulation, simulate_single_run, RunOutcome, RunStats};
