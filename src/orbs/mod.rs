//! Orbs and the bag they are drawn from.

pub mod bag;
pub mod types;

pub use bag::*;
pub use types::*;
