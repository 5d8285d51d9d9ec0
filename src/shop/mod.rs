//! Tiered shop deck with per-item dynamic pricing.

pub mod catalog;
pub mod logic;
pub mod types;

pub use catalog::*;
pub use logic::*;
pub use types::*;
