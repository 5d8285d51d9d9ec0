//! Orb effect resolution, shared by real levels and the playground.

use super::state::PlayerStats;
use crate::orbs::{Orb, OrbType};
use serde::{Deserialize, Serialize};

/// What a single drawn orb changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectOutcome {
    pub health_change: i64,
    pub points_gained: u64,
    pub multiplier_gained: f64,
    pub bits_gained: u64,
    pub glitchbytes_gained: u64,
    /// Orbs or bombs the combo counted, for combo orbs only.
    pub combo_count: Option<u64>,
    /// Unmultiplied score of a scoring orb.
    pub base_points: Option<f64>,
    /// Level multiplier the score was scaled by before flooring.
    pub applied_multiplier: Option<f64>,
}

/// `floor(raw)`, clamped at zero.
fn floor_points(raw: f64) -> u64 {
    if raw.is_finite() && raw > 0.0 {
        raw.floor() as u64
    } else {
        0
    }
}

impl EffectOutcome {
    fn score(&mut self, base_points: f64, multiplier: f64) {
        self.points_gained = floor_points(base_points * multiplier);
        self.base_points = Some(base_points);
        self.applied_multiplier = Some(multiplier);
    }
}

/// Applies `orb` to `stats`. `remaining_orbs` is what is still drawable
/// after `orb` itself was removed.
pub fn apply_orb_effect(
    stats: &mut PlayerStats,
    orb: &Orb,
    remaining_orbs: usize,
    max_health: u32,
) -> EffectOutcome {
    let mut outcome = EffectOutcome::default();
    let multiplier = stats.level_multiplier;

    match orb.orb_type {
        OrbType::Health => {
            let heal = u32::try_from(orb.whole_amount()).unwrap_or(u32::MAX);
            let before = stats.health;
            stats.health = stats.health.saturating_add(heal).min(max_health);
            outcome.health_change = stats.health as i64 - before as i64;
        }
        OrbType::Point => {
            outcome.score(orb.amount, multiplier);
        }
        OrbType::Bomb => {
            let damage = u32::try_from(orb.whole_amount()).unwrap_or(u32::MAX);
            let before = stats.health;
            stats.health = stats.health.saturating_sub(damage);
            stats.bombs_pulled_this_level += 1;
            outcome.health_change = stats.health as i64 - before as i64;
        }
        OrbType::PointsPerAnyorb => {
            let count = remaining_orbs as u64;
            outcome.score(orb.amount * count as f64, multiplier);
            outcome.combo_count = Some(count);
        }
        OrbType::PointsPerBombpulled => {
            // Bombs already drawn; this orb is not one of them.
            let count = stats.bombs_pulled_this_level as u64;
            outcome.score(orb.amount * count as f64, multiplier);
            outcome.combo_count = Some(count);
        }
        OrbType::Multiplier => {
            stats.level_multiplier += orb.amount;
            outcome.multiplier_gained = orb.amount;
        }
        OrbType::Bits => {
            outcome.bits_gained = orb.whole_amount();
            stats.bits = stats.bits.saturating_add(outcome.bits_gained);
        }
        OrbType::Glitchbytes => {
            outcome.glitchbytes_gained = orb.whole_amount();
            stats.glitchbytes = stats.glitchbytes.saturating_add(outcome.glitchbytes_gained);
        }
    }

    stats.points = stats.points.saturating_add(outcome.points_gained);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> PlayerStats {
        PlayerStats::new(100, 5)
    }

    #[test]
    fn test_health_caps_at_max() {
        let mut s = stats();
        s.health = 4;
        let out = apply_orb_effect(&mut s, &Orb::new(OrbType::Health, 3.0), 5, 5);
        assert_eq!(s.health, 5);
        assert_eq!(out.health_change, 1);
    }

    #[test]
    fn test_bomb_floors_health_at_zero() {
        let mut s = stats();
        s.health = 2;
        let out = apply_orb_effect(&mut s, &Orb::new(OrbType::Bomb, 3.0), 5, 5);
        assert_eq!(s.health, 0);
        assert_eq!(out.health_change, -2);
        assert_eq!(s.bombs_pulled_this_level, 1);
    }

    #[test]
    fn test_point_uses_multiplier_and_floors() {
        let mut s = stats();
        s.level_multiplier = 1.5;
        let out = apply_orb_effect(&mut s, &Orb::new(OrbType::Point, 5.0), 5, 5);
        assert_eq!(out.points_gained, 7);
        assert_eq!(out.base_points, Some(5.0));
        assert_eq!(out.applied_multiplier, Some(1.5));
        assert_eq!(s.points, 7);
    }

    #[test]
    fn test_non_scoring_orbs_record_no_multiplier() {
        let mut s = stats();
        s.level_multiplier = 2.0;
        let out = apply_orb_effect(&mut s, &Orb::new(OrbType::Bomb, 1.0), 5, 5);
        assert_eq!(out.base_points, None);
        assert_eq!(out.applied_multiplier, None);
    }

    #[test]
    fn test_points_per_anyorb_counts_remaining() {
        let mut s = stats();
        s.level_multiplier = 2.0;
        let out = apply_orb_effect(&mut s, &Orb::new(OrbType::PointsPerAnyorb, 1.0), 10, 5);
        assert_eq!(out.combo_count, Some(10));
        assert_eq!(out.base_points, Some(10.0));
        assert_eq!(out.applied_multiplier, Some(2.0));
        assert_eq!(s.points, 20);
    }

    #[test]
    fn test_points_per_bombpulled_uses_earlier_bombs() {
        let mut s = stats();
        s.bombs_pulled_this_level = 2;
        let out = apply_orb_effect(&mut s, &Orb::new(OrbType::PointsPerBombpulled, 4.0), 3, 5);
        assert_eq!(out.points_gained, 8);

        let mut none = stats();
        let out = apply_orb_effect(&mut none, &Orb::new(OrbType::PointsPerBombpulled, 4.0), 3, 5);
        assert_eq!(out.points_gained, 0);
    }

    #[test]
    fn test_multiplier_accumulates_uncapped() {
        let mut s = stats();
        for _ in 0..10 {
            apply_orb_effect(&mut s, &Orb::new(OrbType::Multiplier, 0.5), 1, 5);
        }
        assert_eq!(s.level_multiplier, 6.0);
    }

    #[test]
    fn test_currency_orbs() {
        let mut s = stats();
        apply_orb_effect(&mut s, &Orb::new(OrbType::Bits, 10.0), 0, 5);
        apply_orb_effect(&mut s, &Orb::new(OrbType::Glitchbytes, 5.0), 0, 5);
        assert_eq!(s.bits, 10);
        assert_eq!(s.glitchbytes, 105);
        assert_eq!(s.points, 0);
    }
}
