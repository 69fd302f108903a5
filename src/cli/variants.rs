//! Variants command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::color::Color;
use crate::config::StudioConfig;
use crate::output::{render_swatch_grid, save_png, scale_image};
use crate::suggest::unknown_variant_message;
use crate::terminal::render_variant_table;
use crate::variants::{generate_batch, VariantSet, VariantSpec};

/// Pick the requested variants from `specs`, keeping the order they were asked in.
fn select_specs(specs: Vec<VariantSpec>, only: &[String]) -> Result<Vec<VariantSpec>, String> {
    if only.is_empty() {
        return Ok(specs);
    }

    only.iter()
        .map(|name| {
            specs
                .iter()
                .find(|spec| spec.name.eq_ignore_ascii_case(name))
                .cloned()
                .ok_or_else(|| unknown_variant_message(name, &specs))
        })
        .collect()
}

/// Normalize every input to `#rrggbb`, accepting any CSS color.
fn resolve_bases(colors: &[String], config: &StudioConfig) -> Result<Vec<String>, String> {
    if colors.is_empty() {
        return Ok(vec![config.color.default.clone()]);
    }

    colors
        .iter()
        .map(|input| {
            Color::parse(input).map(|c| c.hex().to_string()).map_err(|e| format!("'{}': {}", input, e))
        })
        .collect()
}

fn write_swatch(sets: &[VariantSet], path: &Path, config: &StudioConfig) -> Result<(), String> {
    let rows: Vec<Vec<Color>> = sets
        .iter()
        .map(|set| set.variants.iter().filter_map(|v| Color::from_hex(&v.hex).ok()).collect())
        .collect();

    let image = render_swatch_grid(&rows, config.swatch.size).map_err(|e| e.to_string())?;
    let image = scale_image(image, config.swatch.scale).map_err(|e| e.to_string())?;
    save_png(&image, path).map_err(|e| e.to_string())?;

    tracing::info!(path = %path.display(), width = image.width(), height = image.height(), "swatch written");
    Ok(())
}

/// Execute the variants command
pub fn run_variants(
    colors: &[String],
    only: &[String],
    json: bool,
    swatch: Option<&Path>,
    config: &StudioConfig,
) -> ExitCode {
    let specs = match select_specs(config.variants.specs(), only) {
        Ok(specs) => specs,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let bases = match resolve_bases(colors, config) {
        Ok(bases) => bases,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let sets = match generate_batch(&bases, &specs) {
        Ok(sets) => sets,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if let Some(path) = swatch {
        if let Err(message) = write_swatch(&sets, path, config) {
            eprintln!("Error: {}", message);
            return ExitCode::from(EXIT_ERROR);
        }
        eprintln!("Saved: {}", path.display());
    }

    if json {
        match serde_json::to_string_pretty(&sets) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    let colored = atty::is(atty::Stream::Stdout);
    for (i, set) in sets.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("Base {}", set.base);
        print!("{}", render_variant_table(&set.variants, colored));
    }

    ExitCode::from(EXIT_SUCCESS)
}
