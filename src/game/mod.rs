//! The game-progression state machine.

pub mod effects;
pub mod logic;
pub mod phase;
pub mod session;
pub mod state;

pub use effects::{apply_orb_effect, EffectOutcome};
pub use logic::*;
pub use phase::GamePhase;
pub use session::Session;
pub use state::{GameState, MarketplaceState, PlayerStats};
