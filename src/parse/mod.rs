//! Source parsers
//!
//! Turn a raw argument vector or raw `.env` contents into a flat string map.
//! Neither parser knows anything about the expected-variable schema.

use indexmap::IndexMap;

pub mod argv;
pub mod env_file;

pub use argv::parse_argv;
pub use env_file::{parse_env_file, parse_env_str, FileOptions};

/// Flat key to raw string map produced by a parser, in first-seen key order.
pub type RawMap = IndexMap<String, String>;

/// Strip one layer of matching single or double quotes.
pub(crate) fn strip_quotes(value: &str) -> Option<(&str, char)> {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return Some((&value[1..value.len() - 1], quote));
        }
    }
    None
}
