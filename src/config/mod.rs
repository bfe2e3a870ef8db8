//! Configuration module.
//!
//! Re-exports configuration types and constants for the rest of the crate.

pub mod constants;
mod types;

pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
