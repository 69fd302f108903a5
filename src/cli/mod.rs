//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod color;
mod preview;
mod variants;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;

use crate::config::{ensure_valid, load_config, merge_cli_overrides, CliOverrides, PreviewFormat, StudioConfig};
use crate::logging;

pub use preview::render_source;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Check if a path looks like a product description file (.md or .txt).
pub fn is_description_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("md") | Some("txt"))
}

/// Find all description files in a directory (recursively), sorted by path.
pub fn find_description_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let dir_str = dir.display().to_string();

    for pattern in ["md", "txt"] {
        if let Ok(paths) = glob(&format!("{}/**/*.{}", dir_str, pattern)) {
            files.extend(paths.filter_map(Result::ok));
        }
    }

    files.sort();
    files
}

/// Casalogy studio - color variants and description previews for the storefront admin
#[derive(Parser)]
#[command(name = "casalogy")]
#[command(about = "Casalogy studio - color variants and description previews for the storefront admin")]
#[command(version)]
pub struct Cli {
    /// Path to casalogy.toml (default: search upward, then XDG config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "casalogy=debug" (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the hex and HSL form of a color
    Color {
        /// Color as #RRGGBB, #RGB, a CSS name or any CSS color function
        color: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert HSL components to a hex color
    #[command(allow_negative_numbers = true)]
    Hsl {
        /// Hue in degrees (0-359)
        hue: i32,

        /// Saturation percent (0-100)
        saturation: i32,

        /// Lightness percent (0-100)
        lightness: i32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the named variants of one or more base colors
    Variants {
        /// Base colors (default: color.default from casalogy.toml)
        colors: Vec<String>,

        /// Only show these variants (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Write a PNG swatch grid (one row per base color)
        #[arg(long)]
        swatch: Option<PathBuf>,

        /// Swatch cell size in pixels (1-1024)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1024))]
        size: Option<u32>,

        /// Scale the swatch image by an integer factor (1-16)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: Option<u8>,
    },

    /// Render a product description preview
    Preview {
        /// Description file or directory of .md/.txt files (default: stdin)
        file: Option<PathBuf>,

        /// Read the description from stdin
        #[arg(long, conflicts_with = "file")]
        stdin: bool,

        /// Output format (default: preview.format from casalogy.toml)
        #[arg(long, value_enum)]
        format: Option<PreviewFormat>,

        /// Re-render whenever the file changes
        #[arg(long, conflicts_with = "stdin")]
        watch: bool,
    },
}

impl Commands {
    fn overrides(&self) -> CliOverrides {
        match self {
            Commands::Variants { size, scale, .. } => {
                CliOverrides { swatch_size: *size, scale: *scale, ..Default::default() }
            }
            Commands::Preview { format, .. } => CliOverrides { format: *format, ..Default::default() },
            _ => CliOverrides::default(),
        }
    }
}

fn prepare_config(cli: &Cli) -> Result<StudioConfig, String> {
    let mut config = load_config(cli.config.as_deref()).map_err(|e| e.to_string())?;

    let mut overrides = cli.command.overrides();
    overrides.log_level = cli.log_level.clone();
    overrides.json_logs = cli.json_logs.then_some(true);
    merge_cli_overrides(&mut config, &overrides);
    ensure_valid(&config).map_err(|e| e.to_string())?;

    Ok(config)
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match prepare_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    logging::init(&config.logging);

    match cli.command {
        Commands::Color { color, json } => color::run_color(&color, json),
        Commands::Hsl { hue, saturation, lightness, json } => {
            color::run_hsl(hue, saturation, lightness, json)
        }
        Commands::Variants { colors, only, json, swatch, .. } => {
            variants::run_variants(&colors, &only, json, swatch.as_deref(), &config)
        }
        Commands::Preview { file, stdin, watch, .. } => {
            preview::run_preview(file.as_deref(), stdin, watch, &config)
        }
    }
}
