//! Configuration
//!
//! Every timing threshold, tone and tie-break policy the machine uses.
//! Defaults are the stock prop behavior; [`parse_config`] reads overrides
//! from a small TOML subset.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
