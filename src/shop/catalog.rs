//! Static shop catalog, one list per tier.

use super::types::{ShopItem, ShopTier};
use crate::orbs::OrbType;

fn item(id: &str, name: &str, description: &str, orb_type: OrbType, amount: f64, cost: u64) -> ShopItem {
    ShopItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        orb_type,
        amount,
        cost,
    }
}

/// Basic amounts, affordable prices.
pub fn common_items() -> Vec<ShopItem> {
    vec![
        item("common_health", "BASIC HEALTH", "+1 HP", OrbType::Health, 1.0, 2),
        item("common_point", "BASIC POINTS", "+3 PTS", OrbType::Point, 3.0, 2),
        item("common_points_per_anyorb", "BASIC COMBO", "+1 per orb", OrbType::PointsPerAnyorb, 1.0, 3),
        item("common_points_per_bombpulled", "BASIC DANGER", "+2 per bomb", OrbType::PointsPerBombpulled, 2.0, 3),
        item("common_multiplier", "BASIC BOOST", "+0.2x mult", OrbType::Multiplier, 0.2, 4),
    ]
}

/// Enhanced amounts, moderate prices.
pub fn rare_items() -> Vec<ShopItem> {
    vec![
        item("rare_health", "ENHANCED HEALTH", "+2 HP", OrbType::Health, 2.0, 4),
        item("rare_point", "ENHANCED POINTS", "+8 PTS", OrbType::Point, 8.0, 4),
        item("rare_points_per_anyorb", "ENHANCED COMBO", "+2 per orb", OrbType::PointsPerAnyorb, 2.0, 6),
        item("rare_points_per_bombpulled", "ENHANCED DANGER", "+4 per bomb", OrbType::PointsPerBombpulled, 4.0, 6),
        item("rare_multiplier", "ENHANCED BOOST", "+0.4x mult", OrbType::Multiplier, 0.4, 8),
    ]
}

/// Maximum amounts, premium prices.
pub fn cosmic_items() -> Vec<ShopItem> {
    vec![
        item("cosmic_health", "COSMIC HEALTH", "+3 HP", OrbType::Health, 3.0, 8),
        item("cosmic_point", "COSMIC POINTS", "+15 PTS", OrbType::Point, 15.0, 8),
        item("cosmic_points_per_anyorb", "COSMIC COMBO", "+3 per orb", OrbType::PointsPerAnyorb, 3.0, 12),
        item("cosmic_points_per_bombpulled", "COSMIC DANGER", "+8 per bomb", OrbType::PointsPerBombpulled, 8.0, 12),
        item("cosmic_multiplier", "COSMIC BOOST", "+0.8x mult", OrbType::Multiplier, 0.8, 15),
    ]
}

pub fn tier_items(tier: ShopTier) -> Vec<ShopItem> {
    match tier {
        ShopTier::Common => common_items(),
        ShopTier::Rare => rare_items(),
        ShopTier::Cosmic => cosmic_items(),
    }
}

/// Looks up a catalog entry by id across every tier.
pub fn get_shop_item(id: &str) -> Option<ShopItem> {
    ShopTier::ALL
        .iter()
        .flat_map(|tier| tier_items(*tier))
        .find(|item| item.id == id)
}
