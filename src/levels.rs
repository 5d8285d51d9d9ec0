//! Level milestones, entry costs and end-of-level conditions.

use crate::core::constants::{LEVEL_COSTS, LEVEL_MILESTONES};
use crate::orbs::OrbBag;
use serde::{Deserialize, Serialize};

/// Level-indexed (1-based) milestone and entry-cost tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTable {
    pub milestones: Vec<u64>,
    pub costs: Vec<u64>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            milestones: LEVEL_MILESTONES.to_vec(),
            costs: LEVEL_COSTS.to_vec(),
        }
    }
}

impl LevelTable {
    pub fn level_count(&self) -> u32 {
        self.milestones.len().min(self.costs.len()) as u32
    }

    pub fn is_valid_level(&self, level: u32) -> bool {
        level >= 1 && level <= self.level_count()
    }

    /// Points needed to clear `level`; 0 when out of range.
    pub fn milestone(&self, level: u32) -> u64 {
        if !self.is_valid_level(level) {
            return 0;
        }
        self.milestones[(level - 1) as usize]
    }

    /// Glitchbytes charged to enter `level`; 0 when out of range.
    pub fn entry_cost(&self, level: u32) -> u64 {
        if !self.is_valid_level(level) {
            return 0;
        }
        self.costs[(level - 1) as usize]
    }

    pub fn can_afford_level(&self, glitchbytes: u64, level: u32) -> bool {
        self.is_valid_level(level) && glitchbytes >= self.entry_cost(level)
    }

    /// Total entry cost of levels 1..=`level`; 0 when out of range.
    pub fn cumulative_cost(&self, level: u32) -> u64 {
        if !self.is_valid_level(level) {
            return 0;
        }
        (1..=level).map(|l| self.entry_cost(l)).sum()
    }

    pub fn check_level_complete(&self, points: u64, level: u32) -> bool {
        points >= self.milestone(level)
    }

    pub fn is_last_level(&self, level: u32) -> bool {
        level == self.level_count()
    }

    /// Next level, never past the last one.
    pub fn next_level(&self, level: u32) -> u32 {
        level.saturating_add(1).min(self.level_count())
    }
}

/// Out of health, or nothing left to draw.
pub fn check_game_over(health: u32, bag: &OrbBag) -> bool {
    health == 0 || bag.is_empty()
}
