//! Orb bag tests: draw fairness, conservation, restocking and purchases.

use glitchbomb::core::create_initial_bag;
use glitchbomb::orbs::{OrbBag, OrbType};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

// =========================================================================
// Draw fairness
// =========================================================================

#[test]
fn test_category_frequency_matches_available_share() {
    // Starting bag: 4 bombs, 3 points, 4 singles out of 11.
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let trials = 20_000;
    let mut first_draws: HashMap<OrbType, u32> = HashMap::new();

    for _ in 0..trials {
        let mut bag = create_initial_bag();
        let orb = bag.pull_random_orb(&mut rng).unwrap();
        *first_draws.entry(orb.orb_type).or_insert(0) += 1;
    }

    let share = |ty: OrbType| first_draws.get(&ty).copied().unwrap_or(0) as f64 / trials as f64;
    assert!((share(OrbType::Bomb) - 4.0 / 11.0).abs() < 0.02, "bomb share {}", share(OrbType::Bomb));
    assert!((share(OrbType::Point) - 3.0 / 11.0).abs() < 0.02, "point share {}", share(OrbType::Point));
    assert!((share(OrbType::Health) - 1.0 / 11.0).abs() < 0.015);
    assert_eq!(share(OrbType::Bits), 0.0);
    assert_eq!(share(OrbType::Glitchbytes), 0.0);
}

#[test]
fn test_instances_within_category_are_uniform() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let trials = 12_000;
    let mut by_amount: HashMap<u64, u32> = HashMap::new();

    for _ in 0..trials {
        let mut bag = OrbBag::empty();
        bag.add_orbs(OrbType::Bomb, 1, 1.0);
        bag.add_orbs(OrbType::Bomb, 1, 2.0);
        bag.add_orbs(OrbType::Bomb, 1, 3.0);
        let orb = bag.pull_random_orb(&mut rng).unwrap();
        *by_amount.entry(orb.whole_amount()).or_insert(0) += 1;
    }

    for amount in 1..=3 {
        let share = by_amount[&amount] as f64 / trials as f64;
        assert!((share - 1.0 / 3.0).abs() < 0.025, "amount {} share {}", amount, share);
    }
}

#[test]
fn test_empty_bag_draw_has_no_side_effect() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut bag = OrbBag::empty();
    let before = bag.clone();
    assert!(bag.pull_random_orb(&mut rng).is_none());
    assert_eq!(bag, before);
}

// =========================================================================
// Conservation
// =========================================================================

#[test]
fn test_draining_the_bag_conserves_orbs() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut bag = create_initial_bag();
    let owned = bag.total_owned_orbs();
    let mut drawn = Vec::new();

    while let Some(orb) = bag.pull_random_orb(&mut rng) {
        drawn.push(orb);
        assert!(bag.is_consistent());
        assert_eq!(bag.total_owned_orbs(), owned);
        assert_eq!(bag.total_available_orbs() + drawn.len(), owned);
    }

    assert!(bag.is_empty());
    assert_eq!(drawn.len(), 11);
    let bomb_damage: u64 = drawn
        .iter()
        .filter(|o| o.orb_type == OrbType::Bomb)
        .map(|o| o.whole_amount())
        .sum();
    assert_eq!(bomb_damage, 7);
}

#[test]
fn test_restock_returns_every_drawn_orb() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let fresh = create_initial_bag();
    let mut bag = fresh.clone();
    for _ in 0..6 {
        bag.pull_random_orb(&mut rng);
    }
    bag.reset_consumed_orbs();
    assert_eq!(bag, fresh);
}

#[test]
fn test_purchased_orbs_survive_restock() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut bag = create_initial_bag();
    bag.add_orbs(OrbType::Multiplier, 2, 0.5);
    assert_eq!(bag.total_available_orbs(), 13);

    while bag.pull_random_orb(&mut rng).is_some() {}
    bag.reset_consumed_orbs();

    assert_eq!(bag.total_available_orbs(), 13);
    assert_eq!(bag.available_count(OrbType::Multiplier), 3);
    assert!(bag.is_consistent());
}

// =========================================================================
// Combo counting
// =========================================================================

#[test]
fn test_points_per_any_orb_counts_after_removal() {
    // M = 10 orbs left once the combo orb is out, not 11.
    let mut bag = OrbBag::empty();
    bag.add_orbs(OrbType::PointsPerAnyorb, 1, 1.0);
    bag.add_orbs(OrbType::Point, 10, 5.0);

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    loop {
        let orb = bag.pull_random_orb(&mut rng).unwrap();
        if orb.orb_type == OrbType::PointsPerAnyorb {
            break;
        }
        bag.reset_consumed_orbs();
    }
    assert_eq!(bag.points_per_any_orb_points(1.0), 10.0);
    assert_eq!(bag.points_per_any_orb_points(2.0), 20.0);
}
