use crate::orbs::OrbType;
use crate::pricing::deck_item_price;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopTier {
    Common,
    Rare,
    Cosmic,
}

impl ShopTier {
    pub const ALL: [ShopTier; 3] = [ShopTier::Common, ShopTier::Rare, ShopTier::Cosmic];

    pub fn name(&self) -> &'static str {
        match self {
            ShopTier::Common => "Common",
            ShopTier::Rare => "Rare",
            ShopTier::Cosmic => "Cosmic",
        }
    }
}

/// A static catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub orb_type: OrbType,
    pub amount: f64,
    pub cost: u64,
}

/// A catalog entry with its session pricing state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopDeckItem {
    pub item: ShopItem,
    pub base_cost: u64,
    pub current_cost: u64,
    pub purchase_count: u32,
}

impl ShopDeckItem {
    pub fn from_item(item: ShopItem) -> Self {
        Self {
            base_cost: item.cost,
            current_cost: item.cost,
            purchase_count: 0,
            item,
        }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// Records one purchased unit and reprices.
    pub fn record_purchase(&mut self) {
        self.purchase_count = self.purchase_count.saturating_add(1);
        self.current_cost = deck_item_price(self.base_cost, self.purchase_count);
    }

    /// What `quantity` more units would cost, each at its own price step.
    pub fn quote(&self, quantity: u32) -> u64 {
        (0..quantity).fold(0u64, |total, i| {
            total.saturating_add(deck_item_price(
                self.base_cost,
                self.purchase_count.saturating_add(i),
            ))
        })
    }
}

/// All purchasable items for a session, by tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopDeck {
    pub common: Vec<ShopDeckItem>,
    pub rare: Vec<ShopDeckItem>,
    pub cosmic: Vec<ShopDeckItem>,
}

impl ShopDeck {
    pub fn tier(&self, tier: ShopTier) -> &[ShopDeckItem] {
        match tier {
            ShopTier::Common => &self.common,
            ShopTier::Rare => &self.rare,
            ShopTier::Cosmic => &self.cosmic,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShopDeckItem> {
        self.common.iter().chain(self.rare.iter()).chain(self.cosmic.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ShopDeckItem> {
        self.common
            .iter_mut()
            .chain(self.rare.iter_mut())
            .chain(self.cosmic.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.common.len() + self.rare.len() + self.cosmic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cost: u64) -> ShopItem {
        ShopItem {
            id: "test".to_string(),
            name: "TEST".to_string(),
            description: "test".to_string(),
            orb_type: OrbType::Point,
            amount: 3.0,
            cost,
        }
    }

    #[test]
    fn test_from_item_starts_at_base() {
        let deck_item = ShopDeckItem::from_item(item(4));
        assert_eq!(deck_item.base_cost, 4);
        assert_eq!(deck_item.current_cost, 4);
        assert_eq!(deck_item.purchase_count, 0);
    }

    #[test]
    fn test_record_purchase_reprices() {
        let mut deck_item = ShopDeckItem::from_item(item(2));
        deck_item.record_purchase();
        assert_eq!(deck_item.purchase_count, 1);
        assert_eq!(deck_item.current_cost, 3);
        deck_item.record_purchase();
        deck_item.record_purchase();
        assert_eq!(deck_item.current_cost, 4);
        assert_eq!(deck_item.base_cost, 2);
    }

    #[test]
    fn test_quote_matches_sequential_purchases() {
        let mut deck_item = ShopDeckItem::from_item(item(3));
        let quoted = deck_item.quote(4);
        let mut paid = 0;
        for _ in 0..4 {
            paid += deck_item.current_cost;
            deck_item.record_purchase();
        }
        assert_eq!(quoted, paid);
    }
}
