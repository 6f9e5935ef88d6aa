//! Configuration types and parsing
//!
//! The firmware embeds `machine.toml` and parses it at boot with
//! [`parse_config`].

pub mod parse;
pub mod types;

pub use parse::{parse_config, parse_pin_string, ParseError};
pub use types::*;
