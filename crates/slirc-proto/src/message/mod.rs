//! Parsed representation of a single inbound line.

mod parse;
mod types;

pub use self::types::ParsedMessage;
