//! Simulation report generation.

use super::runner::{RunOutcome, RunStats};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub game_overs: u32,
    pub cash_outs: u32,
    pub stalled: u32,
    pub victory_rate: f64,

    pub avg_furthest_level: f64,
    pub max_furthest_level: u32,
    /// Furthest level reached -> number of runs
    pub level_distribution: BTreeMap<u32, u32>,

    pub avg_glitchbytes_delta: f64,
    pub avg_orbs_pulled: f64,
    pub avg_shop_purchases: f64,
    pub avg_bits_spent: f64,

    #[serde(skip)]
    pub runs: Vec<RunStats>,
}

fn average<I: Iterator<Item = f64>>(values: I, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let count = |outcome: RunOutcome| runs.iter().filter(|r| r.outcome == outcome).count() as u32;
        let victories = count(RunOutcome::Victory);

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.furthest_level).or_insert(0) += 1;
        }

        Self {
            num_runs,
            victories,
            game_overs: count(RunOutcome::GameOver),
            cash_outs: count(RunOutcome::CashedOut),
            stalled: count(RunOutcome::Stalled),
            victory_rate: average(std::iter::once(victories as f64), num_runs),
            avg_furthest_level: average(runs.iter().map(|r| r.furthest_level as f64), num_runs),
            max_furthest_level: runs.iter().map(|r| r.furthest_level).max().unwrap_or(0),
            level_distribution,
            avg_glitchbytes_delta: average(
                runs.iter().map(|r| r.glitchbytes_delta() as f64),
                num_runs,
            ),
            avg_orbs_pulled: average(runs.iter().map(|r| r.orbs_pulled as f64), num_runs),
            avg_shop_purchases: average(runs.iter().map(|r| r.shop_purchases as f64), num_runs),
            avg_bits_spent: average(runs.iter().map(|r| r.bits_spent as f64), num_runs),
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} victories, {} game overs, {} cash-outs, {} stalled\n",
            self.num_runs, self.victories, self.game_overs, self.cash_outs, self.stalled
        ));
        report.push_str(&format!(
            "Victory rate: {:.1}%\n\n",
            self.victory_rate * 100.0
        ));

        report.push_str("PROGRESSION\n");
        report.push_str(&format!(
            "  Furthest level:   avg {:.2}, max {}\n",
            self.avg_furthest_level, self.max_furthest_level
        ));
        for (level, runs) in &self.level_distribution {
            let pct = *runs as f64 / self.num_runs.max(1) as f64 * 100.0;
            report.push_str(&format!(
                "    Level {:>2}: {:>5} runs ({:>5.1}%)\n",
                level, runs, pct
            ));
        }

        report.push_str("\nECONOMY\n");
        report.push_str(&format!(
            "  Glitchbytes delta: {:+.2} per run\n",
            self.avg_glitchbytes_delta
        ));
        report.push_str(&format!("  Orbs pulled:       {:.2}\n", self.avg_orbs_pulled));
        report.push_str(&format!(
            "  Shop purchases:    {:.2} ({:.2} bits)\n",
            self.avg_shop_purchases, self.avg_bits_spent
        ));

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(outcome: RunOutcome, furthest_level: u32, end: u64) -> RunStats {
        RunStats {
            outcome,
            furthest_level,
            glitchbytes_start: 1000,
            glitchbytes_end: end,
            orbs_pulled: 10,
            shop_purchases: 2,
            bits_spent: 12,
        }
    }

    #[test]
    fn test_aggregates() {
        let report = SimReport::from_runs(vec![
            run(RunOutcome::Victory, 7, 1400),
            run(RunOutcome::GameOver, 2, 989),
            run(RunOutcome::CashedOut, 3, 1010),
            run(RunOutcome::GameOver, 1, 990),
        ]);

        assert_eq!(report.num_runs, 4);
        assert_eq!(report.victories, 1);
        assert_eq!(report.game_overs, 2);
        assert_eq!(report.cash_outs, 1);
        assert_eq!(report.victory_rate, 0.25);
        assert_eq!(report.max_furthest_level, 7);
        assert_eq!(report.avg_furthest_level, 3.25);
        assert_eq!(report.avg_glitchbytes_delta, (400.0 - 11.0 + 10.0 - 10.0) / 4.0);
        assert_eq!(report.level_distribution.get(&2), Some(&1));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.victory_rate, 0.0);
        assert!(report.to_text().contains("Runs: 0 total"));
    }

    #[test]
    fn test_json_has_rates_but_not_runs() {
        let report = SimReport::from_runs(vec![run(RunOutcome::Victory, 7, 1200)]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["victory_rate"], 1.0);
        assert!(json.get("runs").is_none());
    }
}
