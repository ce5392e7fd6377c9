//! Configuration loading and layering.
//!
//! Global `config.toml`, an optional explicit file, then environment overrides.

pub mod loader;

pub use loader::{ApiConfig, Config, ConfigError, LoggingConfig, StorageConfig};
