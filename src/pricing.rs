//! Dynamic pricing for repeat purchases.
//!
//! Two independent rules live here:
//! - strategy pricing (`calculate_*`), where each purchase adds the
//!   strategy's increment for that purchase number to the base price
//! - deck pricing (`deck_item_price`), a 20% compounding markup per purchase,
//!   always rounded up, used only for shop deck items

use crate::core::constants::DECK_PRICE_GROWTH;
use crate::orbs::OrbType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How much the price grows with each purchase.
pub trait PricingStrategy {
    fn name(&self) -> &'static str;

    /// Price increase contributed by the `purchase_number`-th purchase (1-based).
    fn increment(&self, purchase_number: u32) -> u64;

    /// Closed form for the dynamic price, when the strategy has one.
    fn closed_form_price(&self, _base_price: u64, _purchase_count: u32) -> Option<u64> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinStrategy {
    /// +1, +2, +3, ...
    Linear,
    /// +1, +2, +4, +8, ...
    Exponential,
    /// +1, +1, +2, +3, +5, ...
    Fibonacci,
    /// +1, +4, +9, ...
    Quadratic,
    /// Price never changes.
    Flat,
    /// base, base+1, base+2, ...
    SimpleIncrement,
}

impl BuiltinStrategy {
    pub const ALL: [BuiltinStrategy; 6] = [
        BuiltinStrategy::Linear,
        BuiltinStrategy::Exponential,
        BuiltinStrategy::Fibonacci,
        BuiltinStrategy::Quadratic,
        BuiltinStrategy::Flat,
        BuiltinStrategy::SimpleIncrement,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            BuiltinStrategy::Linear => "Price increases by purchase number (1, 2, 3, 4...)",
            BuiltinStrategy::Exponential => "Price doubles with each purchase (1, 2, 4, 8...)",
            BuiltinStrategy::Fibonacci => "Price follows Fibonacci sequence (1, 1, 2, 3, 5, 8...)",
            BuiltinStrategy::Quadratic => "Price increases quadratically (1, 4, 9, 16...)",
            BuiltinStrategy::Flat => "No price increase",
            BuiltinStrategy::SimpleIncrement => "Price increases by 1 after each purchase",
        }
    }
}

fn fibonacci(n: u32) -> u64 {
    if n <= 2 {
        return 1;
    }
    let (mut a, mut b) = (1u64, 1u64);
    for _ in 3..=n {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    b
}

impl PricingStrategy for BuiltinStrategy {
    fn name(&self) -> &'static str {
        match self {
            BuiltinStrategy::Linear => "Linear",
            BuiltinStrategy::Exponential => "Exponential",
            BuiltinStrategy::Fibonacci => "Fibonacci",
            BuiltinStrategy::Quadratic => "Quadratic",
            BuiltinStrategy::Flat => "Flat",
            BuiltinStrategy::SimpleIncrement => "Simple Increment",
        }
    }

    fn increment(&self, purchase_number: u32) -> u64 {
        let n = purchase_number as u64;
        match self {
            BuiltinStrategy::Linear => n,
            BuiltinStrategy::Exponential => {
                1u64.checked_shl(purchase_number.saturating_sub(1)).unwrap_or(u64::MAX)
            }
            BuiltinStrategy::Fibonacci => fibonacci(purchase_number),
            BuiltinStrategy::Quadratic => n.saturating_mul(n),
            BuiltinStrategy::Flat => 0,
            BuiltinStrategy::SimpleIncrement => 1,
        }
    }

    fn closed_form_price(&self, base_price: u64, purchase_count: u32) -> Option<u64> {
        match self {
            BuiltinStrategy::SimpleIncrement => {
                Some(base_price.saturating_add(purchase_count as u64))
            }
            BuiltinStrategy::Flat => Some(base_price),
            _ => None,
        }
    }
}

/// Base price plus the increments of every purchase so far, ignoring any
/// closed form.
pub fn summed_dynamic_price<S: PricingStrategy + ?Sized>(
    base_price: u64,
    purchase_count: u32,
    strategy: &S,
) -> u64 {
    (1..=purchase_count).fold(base_price, |price, i| {
        price.saturating_add(strategy.increment(i))
    })
}

/// Price of the next unit after `purchase_count` earlier purchases.
pub fn calculate_dynamic_price<S: PricingStrategy + ?Sized>(
    base_price: u64,
    purchase_count: u32,
    strategy: &S,
) -> u64 {
    if purchase_count == 0 {
        return base_price;
    }
    strategy
        .closed_form_price(base_price, purchase_count)
        .unwrap_or_else(|| summed_dynamic_price(base_price, purchase_count, strategy))
}

/// Cost of buying `quantity` units in one go. Each unit is priced at its own
/// tier, so this is not `quantity * price`.
pub fn calculate_total_cost_for_quantity<S: PricingStrategy + ?Sized>(
    base_price: u64,
    current_count: u32,
    quantity: u32,
    strategy: &S,
) -> u64 {
    (0..quantity).fold(0u64, |total, i| {
        total.saturating_add(calculate_dynamic_price(
            base_price,
            current_count.saturating_add(i),
            strategy,
        ))
    })
}

/// Most units affordable with `budget`, buying greedily until the next unit
/// would go over. 0 when even one unit is too expensive. Free units count
/// like any other; a price stuck at 0 is unbounded and yields `u32::MAX`.
pub fn calculate_max_affordable_quantity<S: PricingStrategy + ?Sized>(
    budget: u64,
    base_price: u64,
    current_count: u32,
    strategy: &S,
) -> u32 {
    let mut quantity = 0u32;
    let mut spent = 0u64;
    while quantity < u32::MAX {
        let count = current_count.saturating_add(quantity);
        let next = calculate_dynamic_price(base_price, count, strategy);
        if next == 0 && strategy.increment(count.saturating_add(1)) == 0 {
            return u32::MAX;
        }
        if spent.saturating_add(next) > budget {
            break;
        }
        spent += next;
        quantity += 1;
    }
    quantity
}

/// Deck item price after `purchase_count` purchases: `ceil(base * 1.2^count)`.
pub fn deck_item_price(base_cost: u64, purchase_count: u32) -> u64 {
    let exponent = i32::try_from(purchase_count).unwrap_or(i32::MAX);
    let price = (base_cost as f64 * DECK_PRICE_GROWTH.powi(exponent)).ceil();
    if price >= u64::MAX as f64 {
        u64::MAX
    } else {
        price as u64
    }
}

/// Strategy selection for base-orb marketplace purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub default_strategy: BuiltinStrategy,
    #[serde(default)]
    pub orb_strategies: BTreeMap<OrbType, BuiltinStrategy>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_strategy: BuiltinStrategy::Flat,
            orb_strategies: BTreeMap::new(),
        }
    }
}

impl PricingConfig {
    pub fn strategy_for(&self, orb_type: OrbType) -> BuiltinStrategy {
        self.orb_strategies
            .get(&orb_type)
            .copied()
            .unwrap_or(self.default_strategy)
    }
}
