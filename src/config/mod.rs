//! Configuration module for Casalogy Studio
//!
//! Provides types and loading for `casalogy.toml`.

pub mod loader;
pub mod schema;

pub use loader::{ensure_valid, find_config, load_config, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;
