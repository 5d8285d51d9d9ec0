//! Game balance configuration.
//!
//! Every table the rules consult lives here so a session can be run with a
//! different balance without touching code. `GameConfig::default()` is the
//! shipped balance; `load_json` overlays a partial JSON file on top of it.

use super::constants::*;
use crate::levels::LevelTable;
use crate::orbs::{OrbBag, OrbType};
use crate::pricing::PricingConfig;
use crate::shop::ShopTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Tiers that become available from `level` onwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierUnlock {
    pub level: u32,
    pub tiers: Vec<ShopTier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub tier_unlocks: Vec<TierUnlock>,
    pub common_slots: usize,
    pub rare_slots: usize,
    pub cosmic_slots: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        let unlock = |level, tiers: &[ShopTier]| TierUnlock {
            level,
            tiers: tiers.to_vec(),
        };
        Self {
            tier_unlocks: vec![
                unlock(1, &[ShopTier::Common]),
                unlock(2, &[ShopTier::Common, ShopTier::Rare]),
                unlock(5, &[ShopTier::Common, ShopTier::Rare, ShopTier::Cosmic]),
            ],
            common_slots: COMMON_OFFER_SLOTS,
            rare_slots: RARE_OFFER_SLOTS,
            cosmic_slots: COSMIC_OFFER_SLOTS,
        }
    }
}

impl ShopConfig {
    pub fn slots(&self, tier: ShopTier) -> usize {
        match tier {
            ShopTier::Common => self.common_slots,
            ShopTier::Rare => self.rare_slots,
            ShopTier::Cosmic => self.cosmic_slots,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub initial_glitchbytes: u64,
    pub max_health: u32,
    pub levels: LevelTable,
    pub health_orb_cost: u64,
    pub point_orb_cost: u64,
    pub default_orb_amounts: BTreeMap<OrbType, f64>,
    pub starting_composition: BTreeMap<OrbType, Vec<f64>>,
    pub shop: ShopConfig,
    pub pricing: PricingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        let default_orb_amounts = BTreeMap::from([
            (OrbType::Health, DEFAULT_HEALTH_AMOUNT),
            (OrbType::Point, DEFAULT_POINT_AMOUNT),
            (OrbType::Bomb, DEFAULT_BOMB_AMOUNT),
            (OrbType::PointsPerAnyorb, DEFAULT_POINTS_PER_ANYORB_AMOUNT),
            (OrbType::PointsPerBombpulled, DEFAULT_POINTS_PER_BOMBPULLED_AMOUNT),
            (OrbType::Multiplier, DEFAULT_MULTIPLIER_AMOUNT),
            (OrbType::Bits, DEFAULT_BITS_AMOUNT),
            (OrbType::Glitchbytes, DEFAULT_GLITCHBYTES_AMOUNT),
        ]);

        let starting_composition = BTreeMap::from([
            (OrbType::Health, STARTING_HEALTH.to_vec()),
            (OrbType::Point, STARTING_POINTS.to_vec()),
            (OrbType::Bomb, STARTING_BOMBS.to_vec()),
            (OrbType::PointsPerAnyorb, STARTING_POINTS_PER_ANYORB.to_vec()),
            (OrbType::PointsPerBombpulled, STARTING_POINTS_PER_BOMBPULLED.to_vec()),
            (OrbType::Multiplier, STARTING_MULTIPLIER.to_vec()),
        ]);

        Self {
            initial_glitchbytes: INITIAL_GLITCHBYTES,
            max_health: MAX_HEALTH,
            levels: LevelTable::default(),
            health_orb_cost: HEALTH_ORB_COST,
            point_orb_cost: POINT_ORB_COST,
            default_orb_amounts,
            starting_composition,
            shop: ShopConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reads a JSON balance file. Fields it omits keep their default values.
    pub fn load_json(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Amount given to a purchased orb when the purchase does not name one.
    pub fn default_amount(&self, orb_type: OrbType) -> f64 {
        self.default_orb_amounts.get(&orb_type).copied().unwrap_or(1.0)
    }

    /// Adds `quantity` orbs to `bag`, at the default amount for `orb_type`
    /// when `amount` is `None`.
    pub fn add_orbs_to_bag(&self, bag: &mut OrbBag, orb_type: OrbType, quantity: u32, amount: Option<f64>) {
        let amount = amount.unwrap_or_else(|| self.default_amount(orb_type));
        bag.add_orbs(orb_type, quantity, amount);
    }

    /// Fresh bag holding exactly the starting composition.
    pub fn initial_bag(&self) -> OrbBag {
        OrbBag::from_composition(&self.starting_composition)
    }
}

/// Starting bag for the shipped balance.
pub fn create_initial_bag() -> OrbBag {
    GameConfig::default().initial_bag()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_bag_composition() {
        let bag = create_initial_bag();
        let amounts = |ty| bag.total(ty).iter().map(|o| o.amount).collect::<Vec<_>>();

        assert_eq!(amounts(OrbType::Bomb), vec![1.0, 1.0, 2.0, 3.0]);
        assert_eq!(amounts(OrbType::Point), vec![5.0, 5.0, 5.0]);
        assert_eq!(amounts(OrbType::Health), vec![1.0]);
        assert_eq!(amounts(OrbType::PointsPerAnyorb), vec![1.0]);
        assert_eq!(amounts(OrbType::PointsPerBombpulled), vec![4.0]);
        assert_eq!(amounts(OrbType::Multiplier), vec![1.0]);
        assert!(amounts(OrbType::Bits).is_empty());
        assert!(amounts(OrbType::Glitchbytes).is_empty());
        assert_eq!(bag.total_available_orbs(), 11);
    }

    #[test]
    fn test_default_amounts() {
        let config = GameConfig::default();
        assert_eq!(config.default_amount(OrbType::Multiplier), 0.5);
        assert_eq!(config.default_amount(OrbType::Bits), 10.0);
        assert_eq!(config.default_amount(OrbType::Point), 5.0);
    }

    #[test]
    fn test_add_orbs_to_bag_defaults_amount() {
        let config = GameConfig::default();
        let mut bag = OrbBag::empty();
        config.add_orbs_to_bag(&mut bag, OrbType::Bomb, 2, None);
        config.add_orbs_to_bag(&mut bag, OrbType::Bomb, 1, Some(4.0));

        let amounts: Vec<f64> = bag.total(OrbType::Bomb).iter().map(|o| o.amount).collect();
        assert_eq!(amounts, vec![2.0, 2.0, 4.0]);
        assert_eq!(bag.available_count(OrbType::Bomb), 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "max_health": 8, "shop": { "rare_slots": 1 } }"#).unwrap();
        assert_eq!(config.max_health, 8);
        assert_eq!(config.shop.rare_slots, 1);
        assert_eq!(config.shop.common_slots, COMMON_OFFER_SLOTS);
        assert_eq!(config.initial_glitchbytes, INITIAL_GLITCHBYTES);
        assert_eq!(config.levels, LevelTable::default());
    }

    #[test]
    fn test_load_json_missing_file() {
        let path = std::env::temp_dir().join("glitchbomb-no-such-config.json");
        assert!(GameConfig::load_json(&path).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let loaded: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }
}
