//! File logging for catalog-search
//!
//! The TUI owns stdout/stderr, so diagnostics go to a log file that is
//! truncated on every run. `RUST_LOG` takes precedence over the configured
//! filter.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default log file name, placed next to the executable
pub const LOG_FILE_NAME: &str = "catalog-search.log";

/// Get the default log file path (same directory as executable)
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Start fresh each run
        .open(path)
}

fn build_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global subscriber.
///
/// Returns the path actually logged to, or `None` when the file could not be
/// opened (logging is then disabled rather than written over the UI).
pub fn init(path: Option<&Path>, filter: &str) -> Option<PathBuf> {
    let log_path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);

    let file = match open_log_file(&log_path) {
        Ok(file) => file,
        Err(_) => {
            let fallback = PathBuf::from(LOG_FILE_NAME);
            match open_log_file(&fallback) {
                Ok(file) => return install(file, filter).then_some(fallback),
                Err(_) => return None,
            }
        }
    };

    install(file, filter).then_some(log_path)
}

fn install(file: File, filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok()
}
