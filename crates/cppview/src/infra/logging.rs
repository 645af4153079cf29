use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

/// Installs the global `tracing` subscriber writing to `log_file`.
///
/// The terminal UI owns stdout, so log lines always go to a file. Parent
/// directories are created on demand.
///
/// # Errors
/// Returns an error when the log file cannot be opened or a global
/// subscriber is already installed.
pub fn init(log_file: &Path, level: Level) -> io::Result<()> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(io::Error::other)
}
