//! Rejected-operation errors.
//!
//! Every variant is an expected outcome of a player command. A command that
//! returns one of these has left the game state unchanged, with one
//! documented exception: [`GameError::EmptyBag`] also ends the level.

use crate::game::GamePhase;
use crate::orbs::OrbType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The command is not allowed in the current phase.
    #[error("cannot {operation} during {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: GamePhase,
    },

    /// The relevant currency balance is too low.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: u64, available: u64 },

    /// Level number outside `1..=level_count`.
    #[error("invalid level {0}")]
    InvalidLevel(u32),

    /// Nothing left to draw.
    #[error("the orb bag is empty")]
    EmptyBag,

    /// No shop deck item has this id.
    #[error("shop item not found: {0}")]
    ItemNotFound(String),

    /// This orb type cannot be bought directly.
    #[error("{0} orbs cannot be purchased")]
    NotPurchasable(OrbType),

    /// Purchases must be for at least one unit.
    #[error("invalid quantity {0}")]
    InvalidQuantity(u32),
}

pub type GameResult<T> = Result<T, GameError>;
