//! Configuration loading and discovery for `casalogy.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{PreviewFormat, StudioConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const CONFIG_FILE: &str = "casalogy.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse casalogy.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override preview format
    pub format: Option<PreviewFormat>,
    /// Override swatch cell size
    pub swatch_size: Option<u32>,
    /// Override swatch scale
    pub scale: Option<u8>,
    /// Override log filter
    pub log_level: Option<String>,
    /// Force JSON logs
    pub json_logs: Option<bool>,
}

/// Find casalogy.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for casalogy.toml
/// 2. Check XDG_CONFIG_HOME/casalogy/casalogy.toml (or ~/.config/casalogy/casalogy.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find casalogy.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("casalogy").join(CONFIG_FILE);
    config_path.exists().then_some(config_path)
}

/// Find casalogy.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise uses
/// [`find_config`]; when nothing is found the defaults are returned.
pub fn load_config(path: Option<&Path>) -> Result<StudioConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(StudioConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<StudioConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: StudioConfig = toml::from_str(&contents)?;
    ensure_valid(&config)?;
    Ok(config)
}

/// Run `validate()` and turn any errors into `ConfigError::Validation`.
pub fn ensure_valid(config: &StudioConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut StudioConfig, overrides: &CliOverrides) {
    if let Some(format) = overrides.format {
        config.preview.format = format;
    }
    if let Some(size) = overrides.swatch_size {
        config.swatch.size = size;
    }
    if let Some(scale) = overrides.scale {
        config.swatch.scale = scale;
    }
    if let Some(ref level) = overrides.log_level {
        config.logging.level = level.clone();
    }
    if let Some(json) = overrides.json_logs {
        config.logging.json = json;
    }
}
