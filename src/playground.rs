//! Deterministic sandbox for trying orb combinations.
//!
//! Orbs are queued in a fixed order and drawn front to back with the same
//! effect rules as a real level, so a combo's value can be checked by hand.

use crate::core::constants::{
    MAX_HEALTH, PLAYGROUND_COMBO_AMOUNT, PLAYGROUND_DANGER_AMOUNT, PLAYGROUND_GLITCHBYTES,
    PLAYGROUND_LOG_LIMIT,
};
use crate::core::config::GameConfig;
use crate::game::{apply_orb_effect, EffectOutcome, PlayerStats};
use crate::orbs::{Orb, OrbType};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundOrb {
    pub id: Uuid,
    pub orb: Orb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbTemplate {
    pub orb_type: OrbType,
    pub name: &'static str,
    pub description: &'static str,
    pub default_amount: f64,
}

/// One template per orb type, in `OrbType::ALL` order.
pub fn orb_templates() -> Vec<OrbTemplate> {
    let config = GameConfig::default();
    OrbType::ALL
        .iter()
        .map(|&orb_type| {
            let (description, default_amount) = match orb_type {
                OrbType::Health => ("Restores health", config.default_amount(orb_type)),
                OrbType::Point => ("Gives points", config.default_amount(orb_type)),
                OrbType::Bomb => ("Damages health", config.default_amount(orb_type)),
                OrbType::PointsPerAnyorb => ("Points per remaining orb", PLAYGROUND_COMBO_AMOUNT),
                OrbType::PointsPerBombpulled => ("Points per bomb pulled", PLAYGROUND_DANGER_AMOUNT),
                OrbType::Multiplier => ("Boosts point multiplier", config.default_amount(orb_type)),
                OrbType::Bits => ("Gives bits currency", config.default_amount(orb_type)),
                OrbType::Glitchbytes => ("Gives glitchbytes currency", config.default_amount(orb_type)),
            };
            OrbTemplate {
                orb_type,
                name: orb_type.display_name(),
                description,
                default_amount,
            }
        })
        .collect()
}

pub fn template_for(orb_type: OrbType) -> Option<OrbTemplate> {
    orb_templates().into_iter().find(|t| t.orb_type == orb_type)
}

/// A drawn playground orb and what it did.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaygroundPull {
    pub orb: PlaygroundOrb,
    pub effect: EffectOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playground {
    pub stats: PlayerStats,
    pub queue: Vec<PlaygroundOrb>,
    pub pulled: Vec<PlaygroundOrb>,
    pub current_index: usize,
    pub active: bool,
    log: VecDeque<String>,
    max_health: u32,
}

impl Default for Playground {
    fn default() -> Self {
        Self::new()
    }
}

impl Playground {
    pub fn new() -> Self {
        Self {
            stats: PlayerStats::new(PLAYGROUND_GLITCHBYTES, MAX_HEALTH),
            queue: Vec::new(),
            pulled: Vec::new(),
            current_index: 0,
            active: false,
            log: VecDeque::new(),
            max_health: MAX_HEALTH,
        }
    }

    fn push_log(&mut self, message: impl AsRef<str>) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.log.push_back(format!("{}: {}", stamp, message.as_ref()));
        while self.log.len() > PLAYGROUND_LOG_LIMIT {
            self.log.pop_front();
        }
    }

    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    /// Queues an orb at the back. `amount` defaults to the template amount.
    pub fn add_orb(&mut self, orb_type: OrbType, amount: Option<f64>) -> Uuid {
        let amount = amount
            .or_else(|| template_for(orb_type).map(|t| t.default_amount))
            .unwrap_or(1.0);
        let id = Uuid::new_v4();
        self.queue.push(PlaygroundOrb {
            id,
            orb: Orb::new(orb_type, amount),
        });
        self.push_log(format!("Added {} (+{}) to bag", orb_type.display_name(), amount));
        id
    }

    /// Drops a queued orb. Returns false when no orb has `id`.
    pub fn remove_orb(&mut self, id: Uuid) -> bool {
        let Some(index) = self.queue.iter().position(|o| o.id == id) else {
            return false;
        };
        let removed = self.queue.remove(index);
        if index < self.current_index {
            self.current_index -= 1;
        }
        self.push_log(format!("Removed {} from bag", removed.orb.orb_type.display_name()));
        true
    }

    pub fn remaining(&self) -> &[PlaygroundOrb] {
        self.queue.get(self.current_index..).unwrap_or(&[])
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining().len()
    }

    pub fn next_orb(&self) -> Option<&PlaygroundOrb> {
        self.queue.get(self.current_index)
    }

    /// Starts pulling. Refused with an empty queue.
    pub fn start(&mut self) -> bool {
        if self.queue.is_empty() {
            self.push_log("Cannot start: No orbs in bag");
            return false;
        }
        self.active = true;
        let count = self.queue.len();
        self.push_log(format!("Playground started with {} orbs", count));
        true
    }

    pub fn can_pull(&self) -> bool {
        self.active && self.remaining_count() > 0 && self.stats.health > 0
    }

    /// Draws the next queued orb. Stops the run on zero health or once the
    /// queue is used up.
    pub fn pull_next(&mut self) -> Option<PlaygroundPull> {
        if !self.active {
            self.push_log("Cannot pull: Playground not active");
            return None;
        }
        let Some(orb) = self.next_orb().cloned() else {
            self.push_log("No more orbs available");
            self.active = false;
            return None;
        };

        let after_this = self.remaining_count() - 1;
        let effect = apply_orb_effect(&mut self.stats, &orb.orb, after_this, self.max_health);
        self.push_log(format!("Pulled {} ({})", orb.orb.label(), describe(&effect)));

        self.pulled.push(orb.clone());
        self.current_index += 1;

        if self.stats.health == 0 {
            self.push_log("Game over! No health remaining");
            self.active = false;
        } else if self.remaining_count() == 0 {
            self.push_log("All orbs pulled! Playground complete");
            self.active = false;
        }

        Some(PlaygroundPull { orb, effect })
    }

    /// Fresh stats, same queue, rewound to the front.
    pub fn reset_stats(&mut self) {
        self.stats = PlayerStats::new(PLAYGROUND_GLITCHBYTES, self.max_health);
        self.current_index = 0;
        self.pulled.clear();
        self.active = true;
        self.push_log("Stats reset, orb bag preserved");
    }

    /// Fresh stats and an empty queue.
    pub fn restart(&mut self) {
        self.stats = PlayerStats::new(PLAYGROUND_GLITCHBYTES, self.max_health);
        self.queue.clear();
        self.pulled.clear();
        self.current_index = 0;
        self.active = false;
        self.push_log("Playground restarted, bag emptied");
    }
}

fn describe(effect: &EffectOutcome) -> String {
    let mut parts = Vec::new();
    if effect.health_change != 0 {
        parts.push(format!("{:+} HP", effect.health_change));
    }
    if effect.points_gained > 0 {
        parts.push(format!("+{} points", effect.points_gained));
    }
    if effect.multiplier_gained != 0.0 {
        parts.push(format!("+{}x", effect.multiplier_gained));
    }
    if effect.bits_gained > 0 {
        parts.push(format!("+{} bits", effect.bits_gained));
    }
    if effect.glitchbytes_gained > 0 {
        parts.push(format!("+{} glitchbytes", effect.glitchbytes_gained));
    }
    if parts.is_empty() {
        "no effect".to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_cover_every_type() {
        let templates = orb_templates();
        assert_eq!(templates.len(), OrbType::ALL.len());
        assert_eq!(template_for(OrbType::PointsPerAnyorb).unwrap().default_amount, 2.0);
        assert_eq!(template_for(OrbType::PointsPerBombpulled).unwrap().default_amount, 3.0);
        assert_eq!(template_for(OrbType::Multiplier).unwrap().default_amount, 0.5);
    }

    #[test]
    fn test_cannot_start_empty() {
        let mut pg = Playground::new();
        assert!(!pg.start());
        assert!(pg.pull_next().is_none());
    }

    #[test]
    fn test_pulls_in_queue_order() {
        let mut pg = Playground::new();
        pg.add_orb(OrbType::Point, Some(5.0));
        pg.add_orb(OrbType::Multiplier, Some(1.0));
        pg.add_orb(OrbType::Point, Some(5.0));
        assert!(pg.start());

        assert_eq!(pg.pull_next().unwrap().effect.points_gained, 5);
        assert_eq!(pg.pull_next().unwrap().effect.multiplier_gained, 1.0);
        assert_eq!(pg.pull_next().unwrap().effect.points_gained, 10);
        assert_eq!(pg.stats.points, 15);
        assert!(!pg.active);
        assert!(pg.pull_next().is_none());
    }

    #[test]
    fn test_combo_excludes_itself() {
        let mut pg = Playground::new();
        pg.add_orb(OrbType::PointsPerAnyorb, None);
        pg.add_orb(OrbType::Point, Some(1.0));
        pg.add_orb(OrbType::Point, Some(1.0));
        pg.start();
        let pull = pg.pull_next().unwrap();
        assert_eq!(pull.effect.combo_count, Some(2));
        assert_eq!(pull.effect.points_gained, 4);
    }

    #[test]
    fn test_danger_counts_earlier_bombs() {
        let mut pg = Playground::new();
        pg.add_orb(OrbType::Bomb, Some(1.0));
        pg.add_orb(OrbType::Bomb, Some(1.0));
        pg.add_orb(OrbType::PointsPerBombpulled, None);
        pg.start();
        pg.pull_next();
        pg.pull_next();
        assert_eq!(pg.pull_next().unwrap().effect.points_gained, 6);
    }

    #[test]
    fn test_zero_health_stops_run() {
        let mut pg = Playground::new();
        pg.add_orb(OrbType::Bomb, Some(5.0));
        pg.add_orb(OrbType::Point, Some(5.0));
        pg.start();
        pg.pull_next();
        assert_eq!(pg.stats.health, 0);
        assert!(!pg.active);
        assert!(!pg.can_pull());
    }

    #[test]
    fn test_remove_before_cursor_shifts_index() {
        let mut pg = Playground::new();
        let first = pg.add_orb(OrbType::Point, None);
        pg.add_orb(OrbType::Health, None);
        let third = pg.add_orb(OrbType::Bits, None);
        pg.start();
        pg.pull_next();
        assert_eq!(pg.current_index, 1);

        assert!(pg.remove_orb(first));
        assert_eq!(pg.current_index, 0);
        assert_eq!(pg.next_orb().unwrap().orb.orb_type, OrbType::Health);
        assert!(pg.remove_orb(third));
        assert!(!pg.remove_orb(third));
        assert_eq!(pg.remaining_count(), 1);
    }

    #[test]
    fn test_reset_stats_keeps_queue() {
        let mut pg = Playground::new();
        pg.add_orb(OrbType::Point, None);
        pg.add_orb(OrbType::Glitchbytes, None);
        pg.start();
        pg.pull_next();
        pg.pull_next();
        assert_eq!(pg.stats.glitchbytes, 505);

        pg.reset_stats();
        assert_eq!(pg.stats.points, 0);
        assert_eq!(pg.stats.glitchbytes, 500);
        assert_eq!(pg.remaining_count(), 2);
        assert!(pg.active);

        pg.restart();
        assert!(pg.queue.is_empty());
        assert!(!pg.active);
    }

    #[test]
    fn test_log_is_capped() {
        let mut pg = Playground::new();
        for _ in 0..30 {
            pg.add_orb(OrbType::Point, None);
        }
        assert_eq!(pg.log().count(), PLAYGROUND_LOG_LIMIT);
        assert!(pg.log().last().unwrap().ends_with("Added Point Orb (+5) to bag"));
    }
}
