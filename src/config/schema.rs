//! Configuration schema types for `casalogy.toml`
//!
//! Defines the structure and validation rules for studio configuration.

use serde::{Deserialize, Serialize};

use crate::color::normalize_hex;
use crate::variants::{VariantSpec, BUILTIN_VARIANTS};

/// Preview output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PreviewFormat {
    /// HTML fragment for the dashboard preview pane
    #[default]
    Html,
    /// Plain text without markup
    Text,
    /// Styled terminal output
    Ansi,
    /// Node tree as JSON
    Json,
}

/// Color picker defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Base color used when none is given on the command line
    #[serde(default = "default_base_color")]
    pub default: String,
}

fn default_base_color() -> String {
    "#4169E1".to_string()
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { default: default_base_color() }
    }
}

/// Variant generation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantsConfig {
    /// Extra variants appended after the builtin table
    #[serde(default)]
    pub custom: Vec<VariantSpec>,
}

impl VariantsConfig {
    /// Builtin variants followed by the configured custom ones.
    pub fn specs(&self) -> Vec<VariantSpec> {
        BUILTIN_VARIANTS.iter().cloned().chain(self.custom.iter().cloned()).collect()
    }
}

/// Description preview settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Default output format
    #[serde(default)]
    pub format: PreviewFormat,
    /// URL schemes allowed in links and images
    #[serde(default = "default_allowed_schemes")]
    pub allowed_schemes: Vec<String>,
}

fn default_allowed_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string(), "mailto".to_string()]
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { format: PreviewFormat::default(), allowed_schemes: default_allowed_schemes() }
    }
}

/// Swatch image settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwatchConfig {
    /// Edge length of one swatch cell in pixels
    #[serde(default = "default_swatch_size")]
    pub size: u32,
    /// Integer upscale applied after rendering
    #[serde(default = "default_scale")]
    pub scale: u8,
}

/// Largest accepted swatch cell edge in pixels
pub const MAX_SWATCH_SIZE: u32 = 1024;

fn default_swatch_size() -> u32 {
    48
}

fn default_scale() -> u8 {
    1
}

impl Default for SwatchConfig {
    fn default() -> Self {
        Self { size: default_swatch_size(), scale: default_scale() }
    }
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Clear terminal between renders
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

fn default_debounce_ms() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: default_debounce_ms(), clear_screen: true }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "warn" or "casalogy=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

/// Complete casalogy.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub color: ColorConfig,
    #[serde(default)]
    pub variants: VariantsConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub swatch: SwatchConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "variants.custom[0].name")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "casalogy.toml: '{}' {}", self.field, self.message)
    }
}

impl StudioConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut error = |field: String, message: &str| {
            errors.push(ConfigValidationError { field, message: message.to_string() });
        };

        if normalize_hex(&self.color.default).is_err() {
            error("color.default".to_string(), "must be a #RRGGBB hex color");
        }

        for (i, spec) in self.variants.custom.iter().enumerate() {
            if spec.name.trim().is_empty() {
                error(format!("variants.custom[{}].name", i), "must be a non-empty string");
            }
            if BUILTIN_VARIANTS.iter().any(|b| b.name.eq_ignore_ascii_case(&spec.name)) {
                error(format!("variants.custom[{}].name", i), "shadows a builtin variant");
            }
            if !(-360..=360).contains(&spec.hue_shift) {
                error(format!("variants.custom[{}].hue_shift", i), "must be between -360 and 360");
            }
            for (component, adjustment) in [("saturation", spec.saturation), ("lightness", spec.lightness)] {
                if !(-100..=100).contains(&adjustment.delta) {
                    error(
                        format!("variants.custom[{}].{}.delta", i, component),
                        "must be between -100 and 100",
                    );
                }
                if let Some(limit) = adjustment.limit {
                    if !(0..=100).contains(&limit) {
                        error(
                            format!("variants.custom[{}].{}.limit", i, component),
                            "must be between 0 and 100",
                        );
                    }
                }
            }
        }

        if self.preview.allowed_schemes.iter().any(|s| s.is_empty() || s.contains(':')) {
            error("preview.allowed_schemes".to_string(), "must be bare scheme names like \"https\"");
        }

        if !(1..=MAX_SWATCH_SIZE).contains(&self.swatch.size) {
            error("swatch.size".to_string(), "must be between 1 and 1024");
        }
        if self.swatch.scale == 0 {
            error("swatch.scale".to_string(), "must be a positive integer");
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: StudioConfig = toml::from_str("").unwrap();
        assert_eq!(config.color.default, "#4169E1");
        assert_eq!(config.preview.format, PreviewFormat::Html);
        assert_eq!(config.preview.allowed_schemes, vec!["http", "https", "mailto"]);
        assert_eq!(config.swatch.size, 48);
        assert_eq!(config.watch.debounce_ms, 100);
        assert_eq!(config.logging.level, "warn");
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r##"
[color]
default = "#0E7C7B"

[[variants.custom]]
name = "Pastel"
description = "Soft pastel"
saturation = { delta = -20, limit = 10 }
lightness = { delta = 25, limit = 92 }

[preview]
format = "ansi"
allowed_schemes = ["https"]

[swatch]
size = 16
scale = 2

[watch]
debounce_ms = 250
clear_screen = false

[logging]
level = "casalogy=debug"
json = true
"##;
        let config: StudioConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.color.default, "#0E7C7B");
        assert_eq!(config.variants.custom.len(), 1);
        assert_eq!(config.variants.custom[0].lightness.delta, 25);
        assert_eq!(config.variants.custom[0].hue_shift, 0);
        assert_eq!(config.preview.format, PreviewFormat::Ansi);
        assert_eq!(config.swatch.scale, 2);
        assert!(!config.watch.clear_screen);
        assert!(config.logging.json);
        assert!(config.is_valid());

        let specs = config.variants.specs();
        assert_eq!(specs.len(), 10);
        assert_eq!(specs[9].name, "Pastel");
    }

    #[test]
    fn test_validation_errors() {
        let toml = r##"
[color]
default = "blue"

[[variants.custom]]
name = "darker"
lightness = { delta = -5, limit = 120 }

[preview]
allowed_schemes = ["https:"]

[swatch]
size = 0
"##;
        let config: StudioConfig = toml::from_str(toml).unwrap();
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "color.default",
                "variants.custom[0].name",
                "variants.custom[0].lightness.limit",
                "preview.allowed_schemes",
                "swatch.size",
            ]
        );
    }

    #[test]
    fn test_validation_rejects_out_of_range_shifts() {
        let toml = r##"
[[variants.custom]]
name = "Spin"
hue_shift = 2147483647
saturation = { delta = -101 }
lightness = { delta = 2147483647 }

[[variants.custom]]
name = "Edge"
hue_shift = -360
lightness = { delta = 100 }
"##;
        let config: StudioConfig = toml::from_str(toml).unwrap();
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "variants.custom[0].hue_shift",
                "variants.custom[0].saturation.delta",
                "variants.custom[0].lightness.delta",
            ]
        );
    }

    #[test]
    fn test_validation_bounds_swatch_size() {
        let mut config = StudioConfig::default();
        config.swatch.size = MAX_SWATCH_SIZE;
        assert!(config.is_valid());

        config.swatch.size = 500_000_000;
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["swatch.size"]);
    }

    #[test]
    fn test_validation_error_display() {
        let error = ConfigValidationError { field: "swatch.size".to_string(), message: "must be a positive integer".to_string() };
        assert_eq!(error.to_string(), "casalogy.toml: 'swatch.size' must be a positive integer");
    }
}
