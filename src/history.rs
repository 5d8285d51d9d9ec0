//! Structured game log and point history.
//!
//! The log is the boundary to whatever renders or stores game events: the
//! rules append one well-formed [`LogEvent`] at every meaningful transition
//! and never read it back.

use crate::game::effects::EffectOutcome;
use crate::orbs::OrbType;
use serde::{Deserialize, Serialize};

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Player stats right after an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub health: u32,
    pub points: u64,
    pub multiplier: f64,
    pub bits: u64,
    pub glitchbytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelChangeReason {
    Advance,
    Complete,
    Victory,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    /// Points into bits when moving on to the marketplace.
    LevelEnd,
    /// Points into glitchbytes when leaving the session.
    CashOut,
    /// Points into glitchbytes after clearing the last level.
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEventKind {
    GameStart,
    GameOver,
    ReturnToMenu,
    CashOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemLevel {
    Debug,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEvent {
    OrbPulled {
        orb_type: OrbType,
        amount: f64,
        effect: EffectOutcome,
        resulting: StatSnapshot,
    },
    ShopPurchase {
        item_id: String,
        item_name: String,
        quantity: u32,
        cost: u64,
        remaining_bits: u64,
    },
    LevelChange {
        from_level: u32,
        to_level: u32,
        cost: Option<u64>,
        reward: Option<u64>,
        reason: LevelChangeReason,
    },
    PointsConversion {
        points_converted: u64,
        gained: u64,
        total: u64,
        conversion: ConversionKind,
    },
    GameEvent {
        event: GameEventKind,
        glitchbytes_earned: Option<u64>,
        final_points: Option<u64>,
        reason: Option<String>,
    },
    System {
        message: String,
        level: SystemLevel,
    },
}

impl LogEvent {
    /// Kind tag of the event.
    pub fn kind(&self) -> &'static str {
        match self {
            LogEvent::OrbPulled { .. } => "orb_pulled",
            LogEvent::ShopPurchase { .. } => "shop_purchase",
            LogEvent::LevelChange { .. } => "level_change",
            LogEvent::PointsConversion { .. } => "points_conversion",
            LogEvent::GameEvent { .. } => "game_event",
            LogEvent::System { .. } => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogEntry {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub event: LogEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vec<GameLogEntry>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps and records an event.
    pub fn append(&mut self, event: LogEvent) {
        log::debug!("game event {}: {:?}", event.kind(), event);
        self.entries.push(GameLogEntry {
            timestamp: now_millis(),
            event,
        });
    }

    pub fn entries(&self) -> &[GameLogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&GameLogEntry> {
        self.entries.last()
    }

    /// Entries whose event has the given kind tag.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a GameLogEntry> + 'a {
        self.entries.iter().filter(move |e| e.event.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// One sample of the points curve shown to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointHistoryEntry {
    pub timestamp: i64,
    pub points: u64,
    pub action: String,
    /// Glitchbytes spent on level entry so far this session.
    pub cumulative_cost: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointHistory {
    entries: Vec<PointHistoryEntry>,
}

impl PointHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, points: u64, action: impl Into<String>, cumulative_cost: u64) {
        self.entries.push(PointHistoryEntry {
            timestamp: now_millis(),
            points,
            action: action.into(),
            cumulative_cost,
        });
    }

    pub fn entries(&self) -> &[PointHistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&PointHistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
