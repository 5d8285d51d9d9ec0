//! Glitch Bomb - push-your-luck orb bag rules engine
//!
//! Players draw orbs from a depleting bag to reach level milestones, then
//! spend their points in a marketplace that sells more orbs at rising
//! prices. This crate holds the rules, their persistence and a balance
//! simulator; rendering is left to the caller.

pub mod core;
pub mod game;
pub mod history;
pub mod levels;
pub mod orbs;
pub mod persistence;
pub mod playground;
pub mod pricing;
pub mod shop;
pub mod simulator;

pub use crate::core::{GameConfig, GameError, GameResult};
pub use game::{GamePhase, GameState, Session};
pub use orbs::{Orb, OrbBag, OrbType};
