//! Watch mode for live description previews
//!
//! Re-renders description files whenever they change on disk, the terminal
//! counterpart of the admin form's keystroke preview.

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::WatchConfig;

/// Error during watch mode
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize file watcher
    #[error("Failed to initialize file watcher: {0}")]
    WatcherInit(notify::Error),
    /// Failed to add watch path
    #[error("Failed to watch path: {0}")]
    WatchPath(notify::Error),
    /// Channel receive error
    #[error("Watch channel error: {0}")]
    ChannelError(String),
    /// Watched file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

/// Options for watch mode
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    /// Description files to watch
    pub files: Vec<PathBuf>,
    /// Watch configuration (debounce, clear screen)
    pub config: WatchConfig,
}

/// Clear the terminal screen
fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

/// Format duration for display
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Resolve a path for comparison with watcher events.
fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Check whether an event path refers to one of the watched files.
fn is_watched(path: &Path, targets: &BTreeSet<PathBuf>) -> bool {
    targets.contains(&canonical(path))
}

/// Render one file and print the result.
fn render_and_print<F>(path: &Path, render: &mut F)
where
    F: FnMut(&Path) -> Result<String, String>,
{
    let start = Instant::now();
    match render(path) {
        Ok(output) => {
            println!("── {} ──", path.display());
            println!("{}", output);
            tracing::info!(file = %path.display(), took = %format_duration(start.elapsed()), "rendered");
        }
        Err(message) => {
            eprintln!("Error: {}: {}", path.display(), message);
        }
    }
}

/// Watch files and re-render them on every change.
///
/// Blocks until the watcher channel closes. Render failures are reported and
/// watching continues.
pub fn watch_and_render<F>(options: WatchOptions, mut render: F) -> Result<(), WatchError>
where
    F: FnMut(&Path) -> Result<String, String>,
{
    for file in &options.files {
        if !file.exists() {
            return Err(WatchError::FileNotFound(file.clone()));
        }
    }

    let targets: BTreeSet<PathBuf> = options.files.iter().map(|f| canonical(f)).collect();

    // Watch parent directories: editors often replace files instead of writing in place
    let dirs: BTreeSet<PathBuf> = targets
        .iter()
        .filter_map(|f| f.parent().map(Path::to_path_buf))
        .collect();

    let (tx, rx) = channel();
    let debounce = Duration::from_millis(options.config.debounce_ms as u64);
    let mut debouncer = new_debouncer(debounce, tx).map_err(WatchError::WatcherInit)?;

    for dir in &dirs {
        debouncer
            .watcher()
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(WatchError::WatchPath)?;
    }

    if options.config.clear_screen {
        clear_screen();
    }
    for file in &options.files {
        render_and_print(file, &mut render);
    }
    tracing::info!(files = options.files.len(), "watching for changes");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: BTreeSet<PathBuf> = events
                    .iter()
                    .filter(|e| matches!(e.kind, DebouncedEventKind::Any) && is_watched(&e.path, &targets))
                    .map(|e| canonical(&e.path))
                    .collect();

                if changed.is_empty() {
                    continue;
                }

                if options.config.clear_screen {
                    clear_screen();
                }
                for file in &changed {
                    render_and_print(file, &mut render);
                }
            }
            Ok(Err(error)) => {
                tracing::warn!(error = ?error, "watch error, continuing");
            }
            Err(e) => {
                return Err(WatchError::ChannelError(e.to_string()));
            }
        }
    }
}
