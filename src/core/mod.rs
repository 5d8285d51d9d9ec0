//! Balance constants, configuration and error types shared by every module.

pub mod config;
pub mod constants;
pub mod error;

pub use config::*;
pub use constants::*;
pub use error::*;
