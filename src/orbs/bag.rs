//! The orb bag: owned orbs per category and the subset still drawable.

use super::types::{Orb, OrbType};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Owned (`total`) and still-drawable (`available`) instances of one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbPool {
    pub available: Vec<Orb>,
    pub total: Vec<Orb>,
}

impl OrbPool {
    pub fn from_orbs(orbs: Vec<Orb>) -> Self {
        Self {
            available: orbs.clone(),
            total: orbs,
        }
    }
}

static EMPTY_POOL: OrbPool = OrbPool {
    available: Vec::new(),
    total: Vec::new(),
};

/// Category -> pool. Every [`OrbType`] always has an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbBag {
    pools: BTreeMap<OrbType, OrbPool>,
}

impl Default for OrbBag {
    fn default() -> Self {
        Self::empty()
    }
}

impl OrbBag {
    /// A bag with every category present and no orbs.
    pub fn empty() -> Self {
        Self {
            pools: OrbType::ALL
                .iter()
                .map(|ty| (*ty, OrbPool::default()))
                .collect(),
        }
    }

    /// Builds a bag from a starting composition: per category, the amounts of
    /// the orbs it starts with.
    pub fn from_composition(composition: &BTreeMap<OrbType, Vec<f64>>) -> Self {
        let mut bag = Self::empty();
        for (ty, amounts) in composition {
            let orbs = amounts.iter().map(|amount| Orb::new(*ty, *amount)).collect();
            bag.pools.insert(*ty, OrbPool::from_orbs(orbs));
        }
        bag
    }

    pub fn pool(&self, orb_type: OrbType) -> &OrbPool {
        self.pools.get(&orb_type).unwrap_or(&EMPTY_POOL)
    }

    fn pool_mut(&mut self, orb_type: OrbType) -> &mut OrbPool {
        self.pools.entry(orb_type).or_default()
    }

    pub fn available(&self, orb_type: OrbType) -> &[Orb] {
        &self.pool(orb_type).available
    }

    pub fn total(&self, orb_type: OrbType) -> &[Orb] {
        &self.pool(orb_type).total
    }

    pub fn available_count(&self, orb_type: OrbType) -> usize {
        self.pool(orb_type).available.len()
    }

    pub fn total_count(&self, orb_type: OrbType) -> usize {
        self.pool(orb_type).total.len()
    }

    /// Number of orbs still drawable across all categories.
    pub fn total_available_orbs(&self) -> usize {
        self.pools.values().map(|p| p.available.len()).sum()
    }

    /// Number of owned orbs across all categories.
    pub fn total_owned_orbs(&self) -> usize {
        self.pools.values().map(|p| p.total.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_available_orbs() == 0
    }

    /// Draws one orb uniformly by instance, so a category's chance is
    /// proportional to how many of its orbs are still available.
    /// Returns None without touching the bag when nothing is left.
    pub fn pull_random_orb<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Orb> {
        let total = self.total_available_orbs();
        if total == 0 {
            return None;
        }

        let mut index = rng.gen_range(0..total);
        for pool in self.pools.values_mut() {
            if index < pool.available.len() {
                return Some(pool.available.remove(index));
            }
            index -= pool.available.len();
        }
        None
    }

    /// Refills every category: `available := total`.
    pub fn reset_consumed_orbs(&mut self) {
        for pool in self.pools.values_mut() {
            pool.available = pool.total.clone();
        }
    }

    /// Adds `quantity` new orbs, owned and immediately drawable.
    pub fn add_orbs(&mut self, orb_type: OrbType, quantity: u32, amount: f64) {
        let pool = self.pool_mut(orb_type);
        for _ in 0..quantity {
            let orb = Orb::new(orb_type, amount);
            pool.total.push(orb);
            pool.available.push(orb);
        }
    }

    /// Bonus for a points-per-any-orb combo. Must be called after the combo
    /// orb itself was drawn, so it is not part of the count.
    pub fn points_per_any_orb_points(&self, per_orb_amount: f64) -> f64 {
        self.total_available_orbs() as f64 * per_orb_amount
    }

    /// True when every category's available orbs are a sub-multiset of its
    /// owned orbs.
    pub fn is_consistent(&self) -> bool {
        self.pools.values().all(|pool| {
            let mut remaining = pool.total.clone();
            pool.available.iter().all(|orb| {
                match remaining.iter().position(|owned| owned == orb) {
                    Some(idx) => {
                        remaining.swap_remove(idx);
                        true
                    }
                    None => false,
                }
            })
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OrbType, &OrbPool)> {
        self.pools.iter()
    }
}
