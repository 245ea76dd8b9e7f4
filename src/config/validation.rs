//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("servers.{0}.host is required")]
    MissingHost(String),
    #[error("servers.{0}.port must be non-zero")]
    InvalidPort(String),
    #[error("servers.{0}.nickname is required")]
    MissingNickname(String),
    #[error("servers.{0}.username is required")]
    MissingUsername(String),
    #[error("servers.{server}.{field} must not contain spaces")]
    ContainsSpace { server: String, field: &'static str },
    #[error("client.read_timeout_ms must be non-zero")]
    ZeroReadTimeout,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.client.read_timeout_ms == 0 {
        errors.push(ValidationError::ZeroReadTimeout);
    }

    for (name, server) in &config.servers {
        if server.host.trim().is_empty() {
            errors.push(ValidationError::MissingHost(name.clone()));
        }
        if server.port == 0 {
            errors.push(ValidationError::InvalidPort(name.clone()));
        }
        if server.nickname.is_empty() {
            errors.push(ValidationError::MissingNickname(name.clone()));
        }
        if server.username.is_empty() {
            errors.push(ValidationError::MissingUsername(name.clone()));
        }

        // Both go out as middle parameters of NICK / USER.
        for (field, value) in [("nickname", &server.nickname), ("username", &server.username)] {
            if value.contains(' ') {
                errors.push(ValidationError::ContainsSpace {
                    server: name.clone(),
                    field,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
