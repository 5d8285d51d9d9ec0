//! Session state and the invariants every command relies on.

use super::phase::GamePhase;
use crate::core::config::GameConfig;
use crate::core::error::{GameError, GameResult};
use crate::history::{GameLog, PointHistory, StatSnapshot};
use crate::orbs::{OrbBag, OrbType};
use crate::shop::{initialize_shop_deck, ShopDeck, ShopDeckItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Persistent currency; spent on level entry, earned by cashing out.
    pub glitchbytes: u64,
    /// Per-run currency spent in the marketplace.
    pub bits: u64,
    pub health: u32,
    pub points: u64,
    pub bombs_pulled_this_level: u32,
    pub level_multiplier: f64,
}

impl PlayerStats {
    pub fn new(glitchbytes: u64, max_health: u32) -> Self {
        Self {
            glitchbytes,
            bits: 0,
            health: max_health,
            points: 0,
            bombs_pulled_this_level: 0,
            level_multiplier: crate::core::constants::BASE_LEVEL_MULTIPLIER,
        }
    }

    /// Clears everything that only lives for one level.
    pub fn reset_for_level(&mut self, max_health: u32) {
        self.health = max_health;
        self.points = 0;
        self.bombs_pulled_this_level = 0;
        self.level_multiplier = crate::core::constants::BASE_LEVEL_MULTIPLIER;
    }

    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            health: self.health,
            points: self.points,
            multiplier: self.level_multiplier,
            bits: self.bits,
            glitchbytes: self.glitchbytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceState {
    pub available: bool,
    pub health_orb_cost: u64,
    pub point_orb_cost: u64,
    pub current_shop_items: Vec<ShopDeckItem>,
    /// Base-orb purchases per type this session, for dynamic pricing.
    pub orb_purchase_counts: BTreeMap<OrbType, u32>,
}

impl MarketplaceState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            available: false,
            health_orb_cost: config.health_orb_cost,
            point_orb_cost: config.point_orb_cost,
            current_shop_items: Vec::new(),
            orb_purchase_counts: BTreeMap::new(),
        }
    }

    pub fn purchase_count(&self, orb_type: OrbType) -> u32 {
        self.orb_purchase_counts.get(&orb_type).copied().unwrap_or(0)
    }

    /// Base price of a direct orb purchase: health orbs have their own price,
    /// every other purchasable type is sold at the point orb price.
    pub fn base_orb_cost(&self, orb_type: OrbType) -> u64 {
        match orb_type {
            OrbType::Health => self.health_orb_cost,
            _ => self.point_orb_cost,
        }
    }

    pub fn close(&mut self) {
        self.available = false;
        self.current_shop_items.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub current_level: u32,
    pub player_stats: PlayerStats,
    pub orb_bag: OrbBag,
    pub marketplace: MarketplaceState,
    pub shop_deck: ShopDeck,
    pub game_log: GameLog,
    pub point_history: PointHistory,
    pub game_started: bool,
    pub level_completed: bool,
    pub committed_to_next_level: bool,
    /// Glitchbytes paid for level entry since the session started.
    pub session_entry_cost: u64,
    pub config: GameConfig,
}

impl Default for GameState {
    fn default() -> Self {
        let config = GameConfig::default();
        let glitchbytes = config.initial_glitchbytes;
        Self::new(config, glitchbytes)
    }
}

impl GameState {
    /// Fresh state in the menu with the given persistent balance.
    pub fn new(config: GameConfig, glitchbytes: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            current_level: 1,
            player_stats: PlayerStats::new(glitchbytes, config.max_health),
            orb_bag: config.initial_bag(),
            marketplace: MarketplaceState::new(&config),
            shop_deck: initialize_shop_deck(),
            game_log: GameLog::new(),
            point_history: PointHistory::new(),
            game_started: false,
            level_completed: false,
            committed_to_next_level: false,
            session_entry_cost: 0,
            config,
        }
    }

    /// Moves to `next` if the transition table allows it.
    pub fn transition(&mut self, next: GamePhase, operation: &'static str) -> GameResult<()> {
        self.check_transition(next, operation)?;
        self.phase = next;
        Ok(())
    }

    /// Same check as [`GameState::transition`] without moving.
    pub fn check_transition(&self, next: GamePhase, operation: &'static str) -> GameResult<()> {
        if self.phase.can_transition_to(next) {
            Ok(())
        } else {
            Err(self.invalid_phase(operation))
        }
    }

    pub fn require_phase(&self, phase: GamePhase, operation: &'static str) -> GameResult<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(self.invalid_phase(operation))
        }
    }

    pub fn invalid_phase(&self, operation: &'static str) -> GameError {
        GameError::InvalidPhase {
            operation,
            phase: self.phase,
        }
    }

    /// Throws away everything belonging to the current run. Glitchbytes,
    /// config and the game log survive; the phase is left to the caller.
    pub fn reset_session(&mut self) {
        let glitchbytes = self.player_stats.glitchbytes;
        self.current_level = 1;
        self.player_stats = PlayerStats::new(glitchbytes, self.config.max_health);
        self.orb_bag = self.config.initial_bag();
        self.marketplace = MarketplaceState::new(&self.config);
        self.shop_deck = initialize_shop_deck();
        self.point_history.clear();
        self.game_started = false;
        self.level_completed = false;
        self.committed_to_next_level = false;
        self.session_entry_cost = 0;
    }

    pub fn current_milestone(&self) -> u64 {
        self.config.levels.milestone(self.current_level)
    }

    /// Points still missing for the current milestone.
    pub fn points_needed(&self) -> u64 {
        self.current_milestone()
            .saturating_sub(self.player_stats.points)
    }

    pub fn snapshot(&self) -> StatSnapshot {
        self.player_stats.snapshot()
    }

    pub(crate) fn record_points(&mut self, action: impl Into<String>) {
        self.point_history
            .record(self.player_stats.points, action, self.session_entry_cost);
    }
}
