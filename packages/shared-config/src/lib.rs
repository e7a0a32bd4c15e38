//! Shared configuration types for the We Are Hunted client
//!
//! This crate holds the immutable configuration that a client instance is
//! built from, so the base URL and network settings are decided once at
//! startup instead of living in global state.

mod error;
mod hunted;

pub use error::{ConfigError, ConfigResult};
pub use hunted::HuntedConfig;

use std::env;

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
