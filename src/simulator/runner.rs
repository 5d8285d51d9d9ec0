//! Main simulation runner.
//!
//! Every simulated session is played through `Session`, so results follow
//! the real rules. The policy only decides which command to issue next.

use super::config::SimConfig;
use super::report::SimReport;
use crate::game::{GamePhase, GameState, Session};
use crate::orbs::OrbType;
use crate::persistence::MemoryStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Victory,
    GameOver,
    CashedOut,
    /// Could not pay for the next level, or hit the action cap.
    Stalled,
}

/// Statistics for one simulated session.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub outcome: RunOutcome,
    pub furthest_level: u32,
    pub glitchbytes_start: u64,
    pub glitchbytes_end: u64,
    pub orbs_pulled: u32,
    pub shop_purchases: u32,
    pub bits_spent: u64,
}

impl RunStats {
    pub fn glitchbytes_delta(&self) -> i64 {
        self.glitchbytes_end as i64 - self.glitchbytes_start as i64
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?}, level {}, glitchbytes {:+}",
                run_idx + 1,
                config.num_runs,
                run.outcome,
                run.furthest_level,
                run.glitchbytes_delta()
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs)
}

/// Chance that the next draw is a bomb big enough to end the level.
pub fn lethal_draw_chance(state: &GameState) -> f64 {
    let total = state.orb_bag.total_available_orbs();
    if total == 0 {
        return 0.0;
    }
    let health = state.player_stats.health as u64;
    let lethal = state
        .orb_bag
        .available(OrbType::Bomb)
        .iter()
        .filter(|bomb| bomb.whole_amount() >= health)
        .count();
    lethal as f64 / total as f64
}

/// Plays one session from the menu to its end.
pub fn simulate_single_run(config: &SimConfig, rng: ChaCha8Rng) -> RunStats {
    let mut session = Session::new(config.game.clone(), rng, MemoryStore::new());
    let glitchbytes_start = session.state().player_stats.glitchbytes;
    let mut stats = RunStats {
        outcome: RunOutcome::Stalled,
        furthest_level: 0,
        glitchbytes_start,
        glitchbytes_end: glitchbytes_start,
        orbs_pulled: 0,
        shop_purchases: 0,
        bits_spent: 0,
    };

    if session.start_new_game().is_err() {
        return stats;
    }

    for _ in 0..config.max_actions_per_run {
        let state = session.state();
        stats.furthest_level = stats.furthest_level.max(state.current_level);

        match state.phase {
            GamePhase::Level => {
                let risky = lethal_draw_chance(state) > config.risk_threshold;
                if risky && state.player_stats.points > 0 {
                    let _ = session.cash_out_mid_level();
                    stats.outcome = RunOutcome::CashedOut;
                    break;
                }
                if session.pull_orb().is_ok() {
                    stats.orbs_pulled += 1;
                }
            }
            GamePhase::Confirmation => {
                let next = state.config.levels.next_level(state.current_level);
                let next_cost = state.config.levels.entry_cost(next);
                if state.player_stats.glitchbytes < next_cost {
                    let _ = session.cash_out_post_level();
                    stats.outcome = RunOutcome::CashedOut;
                    break;
                }
                if session.continue_to_marketplace().is_err() {
                    break;
                }
            }
            GamePhase::Marketplace => {
                shop_greedily(&mut session, &mut stats);
                if session.proceed_to_next_level().is_err() {
                    let _ = session.return_to_menu();
                    break;
                }
            }
            GamePhase::Victory => {
                stats.outcome = RunOutcome::Victory;
                break;
            }
            GamePhase::GameOver => {
                stats.outcome = RunOutcome::GameOver;
                break;
            }
            GamePhase::Menu => break,
        }
    }

    stats.glitchbytes_end = session.state().player_stats.glitchbytes;
    stats
}

/// Buys the cheapest affordable offer until nothing on offer is affordable.
fn shop_greedily(session: &mut Session<ChaCha8Rng, MemoryStore>, stats: &mut RunStats) {
    loop {
        let state = session.state();
        let bits = state.player_stats.bits;
        let cheapest = state
            .marketplace
            .current_shop_items
            .iter()
            .filter(|item| item.current_cost <= bits)
            .min_by_key(|item| item.current_cost)
            .map(|item| item.id().to_string());

        let Some(id) = cheapest else { break };
        match session.purchase_shop_item(&id, 1) {
            Ok(cost) => {
                stats.shop_purchases += 1;
                stats.bits_spent += cost;
            }
            Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig::quick(42);
        let a = run_simulation(&config);
        let b = run_simulation(&config);
        assert_eq!(a.num_runs, 100);
        assert_eq!(a.victories, b.victories);
        assert_eq!(a.avg_glitchbytes_delta, b.avg_glitchbytes_delta);
    }

    #[test]
    fn test_every_run_reaches_level_one() {
        let report = run_simulation(&SimConfig::quick(7));
        assert!(report.runs.iter().all(|r| r.furthest_level >= 1));
        assert!(report.runs.iter().all(|r| r.outcome != RunOutcome::Stalled));
    }

    #[test]
    fn test_lethal_chance_starting_bag() {
        let mut state = GameState::default();
        crate::game::start_new_game(&mut state).unwrap();
        assert_eq!(lethal_draw_chance(&state), 0.0);
        state.player_stats.health = 2;
        // Bombs of 2 and 3 out of 11 orbs.
        assert!((lethal_draw_chance(&state) - 2.0 / 11.0).abs() < 1e-9);
    }
}
