//! Configuration loading.
//!
//! - [`types`]: `Config`, per-server records and client settings
//! - [`defaults`]: serde default functions
//! - [`validation`]: startup checks

mod defaults;
mod types;
pub mod validation;

pub use types::{ClientSettings, Config, ConfigError, ServerConfig};
pub use validation::{ValidationError, validate};
