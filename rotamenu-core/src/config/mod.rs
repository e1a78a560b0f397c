//! Configuration types
//!
//! Timing constants for the menu system, loadable from a small TOML file.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
