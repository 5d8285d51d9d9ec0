//! Shop deck setup, per-level offer rolls and purchase repricing.

use super::catalog::tier_items;
use super::types::{ShopDeck, ShopDeckItem, ShopTier};
use crate::core::config::ShopConfig;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fresh deck at base prices with no purchases recorded.
pub fn initialize_shop_deck() -> ShopDeck {
    let build = |tier| {
        tier_items(tier)
            .into_iter()
            .map(ShopDeckItem::from_item)
            .collect::<Vec<_>>()
    };
    ShopDeck {
        common: build(ShopTier::Common),
        rare: build(ShopTier::Rare),
        cosmic: build(ShopTier::Cosmic),
    }
}

/// Tiers on sale at `level`: the unlock entry with the highest level not
/// above `level`, or the lowest entry when `level` precedes them all.
pub fn unlocked_tiers(config: &ShopConfig, level: u32) -> Vec<ShopTier> {
    let mut unlocks: Vec<_> = config.tier_unlocks.iter().collect();
    unlocks.sort_by_key(|u| u.level);
    unlocks
        .iter()
        .rev()
        .find(|u| u.level <= level)
        .or_else(|| unlocks.first())
        .map(|u| u.tiers.clone())
        .unwrap_or_else(|| vec![ShopTier::Common])
}

/// Rolls the marketplace offer for `level`: each unlocked tier is shuffled
/// (Fisher-Yates, via `SliceRandom::shuffle`) and its first slots are taken.
/// The combined offer is sorted by current price, cheapest first.
pub fn available_shop_items_from_deck<R: Rng + ?Sized>(
    deck: &ShopDeck,
    config: &ShopConfig,
    level: u32,
    rng: &mut R,
) -> Vec<ShopDeckItem> {
    let tiers = unlocked_tiers(config, level);
    let mut offer = Vec::new();

    for tier in ShopTier::ALL {
        if !tiers.contains(&tier) {
            continue;
        }
        let mut shuffled = deck.tier(tier).to_vec();
        shuffled.shuffle(rng);
        shuffled.truncate(config.slots(tier));
        offer.extend(shuffled);
    }

    offer.sort_by_key(|item| item.current_cost);
    offer
}

/// Records one purchased unit of `item` and reprices it.
pub fn update_deck_item_price(item: &mut ShopDeckItem) {
    item.record_purchase();
}

pub fn find_deck_item<'a>(deck: &'a ShopDeck, id: &str) -> Option<&'a ShopDeckItem> {
    deck.iter().find(|item| item.id() == id)
}

pub fn find_deck_item_mut<'a>(deck: &'a mut ShopDeck, id: &str) -> Option<&'a mut ShopDeckItem> {
    deck.iter_mut().find(|item| item.id() == id)
}
