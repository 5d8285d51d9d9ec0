//! Player commands.
//!
//! Each command validates the phase and its inputs before touching the
//! state, so a command that returns an error has changed nothing. The one
//! exception is `pull_orb` on an empty bag, which ends the level.

use super::effects::{apply_orb_effect, EffectOutcome};
use super::phase::GamePhase;
use super::state::GameState;
use crate::core::error::{GameError, GameResult};
use crate::history::{
    ConversionKind, GameEventKind, LevelChangeReason, LogEvent, SystemLevel,
};
use crate::levels::check_game_over;
use crate::orbs::{Orb, OrbType};
use crate::pricing::{calculate_max_affordable_quantity, calculate_total_cost_for_quantity};
use crate::shop::{
    available_shop_items_from_deck, find_deck_item_mut, update_deck_item_price, ShopDeckItem,
};
use rand::Rng;

/// Result of a successful draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullOutcome {
    pub orb: Orb,
    pub effect: EffectOutcome,
    /// Phase after the draw was resolved.
    pub phase: GamePhase,
}

// ── Level entry ──────────────────────────────────────────────────

fn validate_level_entry(state: &GameState, level: u32) -> GameResult<u64> {
    let levels = &state.config.levels;
    if !levels.is_valid_level(level) {
        log::warn!(
            "rejected entry to level {} (valid levels are 1..={})",
            level,
            levels.level_count()
        );
        return Err(GameError::InvalidLevel(level));
    }
    let cost = levels.entry_cost(level);
    let available = state.player_stats.glitchbytes;
    if available < cost {
        return Err(GameError::InsufficientFunds {
            required: cost,
            available,
        });
    }
    Ok(cost)
}

/// Enters a level already checked by `validate_level_entry`.
fn enter_validated_level(state: &mut GameState, level: u32, cost: u64) -> GameResult<()> {
    state.transition(GamePhase::Level, "enter a level")?;

    let from_level = state.current_level;
    state.player_stats.glitchbytes -= cost;
    state.session_entry_cost = state.session_entry_cost.saturating_add(cost);
    state.current_level = level;
    state.player_stats.reset_for_level(state.config.max_health);
    state.level_completed = false;
    state.game_started = true;
    state.marketplace.close();

    if level == 1 {
        state.orb_bag.reset_consumed_orbs();
        state.player_stats.bits = 0;
    }

    state.game_log.append(LogEvent::LevelChange {
        from_level,
        to_level: level,
        cost: Some(cost),
        reward: None,
        reason: LevelChangeReason::Advance,
    });
    let action = if level > 1 {
        format!("entered level {} for {} glitchbytes", level, cost)
    } else {
        "entered level 1".to_string()
    };
    state.record_points(action);
    Ok(())
}

/// Starts a session from the menu: clears the log and history, builds a
/// base-price shop deck and enters level 1.
pub fn start_new_game(state: &mut GameState) -> GameResult<()> {
    state.check_transition(GamePhase::Level, "start a new game")?;
    let cost = validate_level_entry(state, 1)?;

    state.game_log.clear();
    state.reset_session();
    state.game_started = true;
    state.game_log.append(LogEvent::GameEvent {
        event: GameEventKind::GameStart,
        glitchbytes_earned: None,
        final_points: None,
        reason: None,
    });
    enter_validated_level(state, 1, cost)
}

/// Pays the entry cost and starts `level` with fresh level stats.
/// Allowed from the menu or the marketplace.
pub fn enter_level(state: &mut GameState, level: u32) -> GameResult<()> {
    state.check_transition(GamePhase::Level, "enter a level")?;
    let cost = validate_level_entry(state, level)?;
    enter_validated_level(state, level, cost)
}

// ── Drawing ──────────────────────────────────────────────────────

fn end_in_game_over(state: &mut GameState, reason: &str) -> GameResult<()> {
    state.transition(GamePhase::GameOver, "end the level")?;
    state.game_log.append(LogEvent::GameEvent {
        event: GameEventKind::GameOver,
        glitchbytes_earned: None,
        final_points: Some(state.player_stats.points),
        reason: Some(reason.to_string()),
    });
    Ok(())
}

/// Draws one orb and resolves it. Reaching the milestone takes precedence
/// over running out of health or orbs on the same draw.
pub fn pull_orb<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> GameResult<PullOutcome> {
    state.require_phase(GamePhase::Level, "pull an orb")?;

    let Some(orb) = state.orb_bag.pull_random_orb(rng) else {
        if state
            .config
            .levels
            .check_level_complete(state.player_stats.points, state.current_level)
        {
            complete_level(state)?;
        } else {
            end_in_game_over(state, "the orb bag is empty")?;
        }
        return Err(GameError::EmptyBag);
    };

    let remaining = state.orb_bag.total_available_orbs();
    let max_health = state.config.max_health;
    let effect = apply_orb_effect(&mut state.player_stats, &orb, remaining, max_health);

    state.game_log.append(LogEvent::OrbPulled {
        orb_type: orb.orb_type,
        amount: orb.amount,
        effect,
        resulting: state.snapshot(),
    });
    if effect.points_gained > 0 {
        state.record_points(format!("pulled {}", orb.label()));
    }

    let complete = state
        .config
        .levels
        .check_level_complete(state.player_stats.points, state.current_level);
    if complete {
        complete_level(state)?;
    } else if check_game_over(state.player_stats.health, &state.orb_bag) {
        let reason = if state.player_stats.health == 0 {
            "health depleted"
        } else {
            "the orb bag is empty"
        };
        end_in_game_over(state, reason)?;
    }

    Ok(PullOutcome {
        orb,
        effect,
        phase: state.phase,
    })
}

/// Finishes the current level. The last level ends the run in victory and
/// banks the points as glitchbytes; any other level waits for the player
/// to choose between cashing out and the marketplace.
pub fn complete_level(state: &mut GameState) -> GameResult<()> {
    state.require_phase(GamePhase::Level, "complete a level")?;
    let level = state.current_level;
    let points = state.player_stats.points;

    if state.config.levels.is_last_level(level) {
        state.transition(GamePhase::Victory, "complete a level")?;
        state.level_completed = true;
        state.player_stats.glitchbytes = state.player_stats.glitchbytes.saturating_add(points);
        state.game_log.append(LogEvent::PointsConversion {
            points_converted: points,
            gained: points,
            total: state.player_stats.glitchbytes,
            conversion: ConversionKind::Victory,
        });
        state.game_log.append(LogEvent::LevelChange {
            from_level: level,
            to_level: level,
            cost: None,
            reward: Some(points),
            reason: LevelChangeReason::Victory,
        });
    } else {
        state.transition(GamePhase::Confirmation, "complete a level")?;
        state.level_completed = true;
        state.marketplace.current_shop_items.clear();
        state.game_log.append(LogEvent::LevelChange {
            from_level: level,
            to_level: level,
            cost: None,
            reward: None,
            reason: LevelChangeReason::Complete,
        });
    }
    state.record_points(format!("completed level {}", level));
    Ok(())
}

// ── Marketplace ──────────────────────────────────────────────────

/// Banks the level's points as bits and opens the marketplace with a
/// freshly rolled offer. The bag is restocked for the next level.
pub fn continue_to_marketplace<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
) -> GameResult<()> {
    state.transition(GamePhase::Marketplace, "open the marketplace")?;

    let points = state.player_stats.points;
    state.player_stats.bits = state.player_stats.bits.saturating_add(points);
    state.player_stats.points = 0;
    state.game_log.append(LogEvent::PointsConversion {
        points_converted: points,
        gained: points,
        total: state.player_stats.bits,
        conversion: ConversionKind::LevelEnd,
    });

    state.marketplace.current_shop_items = available_shop_items_from_deck(
        &state.shop_deck,
        &state.config.shop,
        state.current_level,
        rng,
    );
    state.marketplace.available = true;
    state.orb_bag.reset_consumed_orbs();
    state.committed_to_next_level = true;
    Ok(())
}

fn require_open_marketplace(state: &GameState, operation: &'static str) -> GameResult<()> {
    state.require_phase(GamePhase::Marketplace, operation)?;
    if !state.marketplace.available {
        return Err(state.invalid_phase(operation));
    }
    Ok(())
}

fn require_funds(required: u64, available: u64) -> GameResult<()> {
    if available < required {
        Err(GameError::InsufficientFunds {
            required,
            available,
        })
    } else {
        Ok(())
    }
}

/// Bits needed to buy `quantity` plain orbs of `orb_type` right now.
pub fn quote_orb_purchase(state: &GameState, orb_type: OrbType, quantity: u32) -> u64 {
    let market = &state.marketplace;
    let strategy = state.config.pricing.strategy_for(orb_type);
    calculate_total_cost_for_quantity(
        market.base_orb_cost(orb_type),
        market.purchase_count(orb_type),
        quantity,
        &strategy,
    )
}

/// Most plain orbs of `orb_type` the current bits can buy.
pub fn max_affordable_orbs(state: &GameState, orb_type: OrbType) -> u32 {
    if !orb_type.is_purchasable() {
        return 0;
    }
    let market = &state.marketplace;
    let strategy = state.config.pricing.strategy_for(orb_type);
    calculate_max_affordable_quantity(
        state.player_stats.bits,
        market.base_orb_cost(orb_type),
        market.purchase_count(orb_type),
        &strategy,
    )
}

/// Buys `quantity` plain orbs at the configured default amount. Returns
/// the bits spent.
pub fn purchase_orb(state: &mut GameState, orb_type: OrbType, quantity: u32) -> GameResult<u64> {
    require_open_marketplace(state, "purchase orbs")?;
    if quantity == 0 {
        return Err(GameError::InvalidQuantity(quantity));
    }
    if !orb_type.is_purchasable() {
        return Err(GameError::NotPurchasable(orb_type));
    }
    let cost = quote_orb_purchase(state, orb_type, quantity);
    require_funds(cost, state.player_stats.bits)?;

    state.player_stats.bits -= cost;
    state
        .config
        .add_orbs_to_bag(&mut state.orb_bag, orb_type, quantity, None);
    *state
        .marketplace
        .orb_purchase_counts
        .entry(orb_type)
        .or_insert(0) += quantity;

    state.game_log.append(LogEvent::ShopPurchase {
        item_id: orb_type.as_str().to_string(),
        item_name: orb_type.display_name().to_string(),
        quantity,
        cost,
        remaining_bits: state.player_stats.bits,
    });
    Ok(cost)
}

fn offered_item<'a>(state: &'a GameState, item_id: &str) -> GameResult<&'a ShopDeckItem> {
    state
        .marketplace
        .current_shop_items
        .iter()
        .find(|item| item.id() == item_id)
        .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))
}

/// Bits needed to buy `quantity` units of an offered deck item right now.
pub fn quote_shop_item(state: &GameState, item_id: &str, quantity: u32) -> GameResult<u64> {
    let offered = offered_item(state, item_id)?;
    let deck_item = state
        .shop_deck
        .iter()
        .find(|item| item.id() == offered.id())
        .unwrap_or(offered);
    Ok(deck_item.quote(quantity))
}

/// Buys `quantity` units of an item from the current offer. The deck item
/// is repriced once per unit. Returns the bits spent.
pub fn purchase_shop_item(state: &mut GameState, item_id: &str, quantity: u32) -> GameResult<u64> {
    require_open_marketplace(state, "purchase shop items")?;
    if quantity == 0 {
        return Err(GameError::InvalidQuantity(quantity));
    }
    let item = offered_item(state, item_id)?.item.clone();
    let cost = quote_shop_item(state, item_id, quantity)?;
    require_funds(cost, state.player_stats.bits)?;

    let deck_item = find_deck_item_mut(&mut state.shop_deck, item_id)
        .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))?;
    for _ in 0..quantity {
        update_deck_item_price(deck_item);
    }
    let repriced = deck_item.clone();

    state.player_stats.bits -= cost;
    state.orb_bag.add_orbs(item.orb_type, quantity, item.amount);
    if let Some(offered) = state
        .marketplace
        .current_shop_items
        .iter_mut()
        .find(|offered| offered.id() == item_id)
    {
        *offered = repriced;
    }

    state.game_log.append(LogEvent::ShopPurchase {
        item_id: item.id,
        item_name: item.name,
        quantity,
        cost,
        remaining_bits: state.player_stats.bits,
    });
    Ok(cost)
}

/// Leaves the marketplace for the next level.
pub fn proceed_to_next_level(state: &mut GameState) -> GameResult<()> {
    state.require_phase(GamePhase::Marketplace, "proceed to the next level")?;
    let next = state.config.levels.next_level(state.current_level);
    let cost = validate_level_entry(state, next)?;

    state.committed_to_next_level = false;
    enter_validated_level(state, next, cost)
}

// ── Leaving a session ────────────────────────────────────────────

fn cash_out(state: &mut GameState, operation: &'static str) -> GameResult<u64> {
    state.check_transition(GamePhase::Menu, operation)?;

    let points = state.player_stats.points;
    state.player_stats.glitchbytes = state.player_stats.glitchbytes.saturating_add(points);
    state.game_log.append(LogEvent::PointsConversion {
        points_converted: points,
        gained: points,
        total: state.player_stats.glitchbytes,
        conversion: ConversionKind::CashOut,
    });
    state.game_log.append(LogEvent::GameEvent {
        event: GameEventKind::CashOut,
        glitchbytes_earned: Some(points),
        final_points: Some(points),
        reason: None,
    });

    state.reset_session();
    state.transition(GamePhase::Menu, operation)?;
    Ok(points)
}

/// Abandons the level and banks its points as glitchbytes, 1:1.
pub fn cash_out_mid_level(state: &mut GameState) -> GameResult<u64> {
    state.require_phase(GamePhase::Level, "cash out mid-level")?;
    cash_out(state, "cash out mid-level")
}

/// Banks a completed level's points as glitchbytes instead of continuing.
pub fn cash_out_post_level(state: &mut GameState) -> GameResult<u64> {
    state.require_phase(GamePhase::Confirmation, "cash out")?;
    cash_out(state, "cash out")
}

/// Forfeits the session and goes back to the menu.
pub fn return_to_menu(state: &mut GameState) -> GameResult<()> {
    state.check_transition(GamePhase::Menu, "return to the menu")?;
    let points = state.player_stats.points;
    state.reset_session();
    state.game_log.clear();
    state.transition(GamePhase::Menu, "return to the menu")?;
    state.game_log.append(LogEvent::GameEvent {
        event: GameEventKind::ReturnToMenu,
        glitchbytes_earned: None,
        final_points: Some(points),
        reason: None,
    });
    Ok(())
}

/// Throws the current session away and starts a new one.
pub fn restart_game(state: &mut GameState) -> GameResult<()> {
    validate_level_entry(state, 1)?;
    if state.phase != GamePhase::Menu {
        return_to_menu(state)?;
    }
    start_new_game(state)
}

// ── Debug ────────────────────────────────────────────────────────

/// Grants exactly enough points to clear the current milestone, then runs
/// the usual completion check. Returns the points granted.
pub fn skip_level(state: &mut GameState) -> GameResult<u64> {
    state.require_phase(GamePhase::Level, "skip a level")?;

    let needed = state.points_needed();
    let multiplier = state.player_stats.level_multiplier;
    let granted = if needed == 0 {
        0
    } else if multiplier > 0.0 {
        let base = (needed as f64 / multiplier).ceil();
        ((base * multiplier).floor() as u64).max(needed)
    } else {
        needed
    };
    state.player_stats.points = state.player_stats.points.saturating_add(granted);

    state.game_log.append(LogEvent::System {
        message: format!("skipped level {} with {} points", state.current_level, granted),
        level: SystemLevel::Debug,
    });
    state.game_log.append(LogEvent::LevelChange {
        from_level: state.current_level,
        to_level: state.current_level,
        cost: None,
        reward: Some(granted),
        reason: LevelChangeReason::Skip,
    });

    if state
        .config
        .levels
        .check_level_complete(state.player_stats.points, state.current_level)
    {
        complete_level(state)?;
    }
    Ok(granted)
}
