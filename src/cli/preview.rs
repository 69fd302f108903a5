//! Preview command implementation

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{find_description_files, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::{PreviewFormat, StudioConfig};
use crate::preview::{parse, render_ansi, render_html, render_plain, HtmlOptions};
use crate::watch::{watch_and_render, WatchOptions};

/// Render description markup in the given format.
///
/// # Examples
///
/// ```
/// use casalogy::cli::render_source;
/// use casalogy::config::PreviewFormat;
/// use casalogy::preview::HtmlOptions;
///
/// let html = render_source("**Soft** stretch", PreviewFormat::Html, &HtmlOptions::default()).unwrap();
/// assert_eq!(html, "<p><strong>Soft</strong> stretch</p>");
/// ```
pub fn render_source(
    text: &str,
    format: PreviewFormat,
    options: &HtmlOptions,
) -> Result<String, serde_json::Error> {
    let lines = parse(text);
    Ok(match format {
        PreviewFormat::Html => render_html(&lines, options),
        PreviewFormat::Text => render_plain(&lines),
        PreviewFormat::Ansi => render_ansi(&lines),
        PreviewFormat::Json => serde_json::to_string_pretty(&lines)?,
    })
}

fn render_file(path: &Path, format: PreviewFormat, options: &HtmlOptions) -> Result<String, String> {
    let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
    render_source(&text, format, options).map_err(|e| e.to_string())
}

/// Expand a directory argument into its description files.
fn input_files(path: &Path) -> Vec<PathBuf> {
    if path.is_dir() {
        find_description_files(path)
    } else {
        vec![path.to_path_buf()]
    }
}

/// Execute the preview command
pub fn run_preview(file: Option<&Path>, stdin: bool, watch: bool, config: &StudioConfig) -> ExitCode {
    let format = config.preview.format;
    let options = HtmlOptions { allowed_schemes: config.preview.allowed_schemes.clone() };

    let path = match file {
        Some(path) if !stdin => path,
        _ => {
            if watch {
                eprintln!("Error: --watch needs a file or directory");
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
            let mut text = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut text) {
                eprintln!("Error: Failed to read stdin: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
            return match render_source(&text, format, &options) {
                Ok(out) => {
                    println!("{}", out);
                    ExitCode::from(EXIT_SUCCESS)
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(EXIT_ERROR)
                }
            };
        }
    };

    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        return ExitCode::from(EXIT_ERROR);
    }

    let files = input_files(path);
    if files.is_empty() {
        eprintln!("Error: No .md or .txt files in {}", path.display());
        return ExitCode::from(EXIT_ERROR);
    }

    if watch {
        let watch_options = WatchOptions { files, config: config.watch.clone() };
        return match watch_and_render(watch_options, |p| render_file(p, format, &options)) {
            Ok(()) => ExitCode::from(EXIT_SUCCESS),
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    let many = files.len() > 1;
    let mut failed = false;
    for file in &files {
        match render_file(file, format, &options) {
            Ok(out) => {
                if many {
                    println!("── {} ──", file.display());
                }
                println!("{}", out);
            }
            Err(e) => {
                eprintln!("Error: {}: {}", file.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_source_formats() {
        let options = HtmlOptions::default();
        let text = "- **Soft** [care](https://casalogy.com/care)";

        assert_eq!(
            render_source(text, PreviewFormat::Html, &options).unwrap(),
            "<ul><li><strong>Soft</strong> <a href=\"https://casalogy.com/care\" target=\"_blank\" rel=\"noopener noreferrer\">care</a></li></ul>"
        );
        assert_eq!(
            render_source(text, PreviewFormat::Text, &options).unwrap(),
            "• Soft care (https://casalogy.com/care)"
        );

        let json = render_source(text, PreviewFormat::Json, &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["kind"], "bullet");
        assert_eq!(value[0]["nodes"][0]["type"], "bold");
    }

    #[test]
    fn test_input_files_for_plain_file() {
        let path = Path::new("scrub-top.md");
        assert_eq!(input_files(path), vec![PathBuf::from("scrub-top.md")]);
    }
}
