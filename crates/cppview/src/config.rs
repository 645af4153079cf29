//! Command-line configuration.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::Level;

/// Directory under the home directory holding logs.
pub const CPPVIEW_DIR: &str = ".cppview";
pub const LOG_FILE: &str = "cppview.log";

/// Browse a C/C++ workspace with headers grouped next to their sources
#[derive(Debug, Parser)]
#[command(name = "cppview", version, about, long_about = None)]
pub struct Cli {
    /// Workspace root to browse (default: current directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Print the grouped tree to stdout and exit
    #[arg(long)]
    pub print: bool,

    /// Print the tree as JSON instead of indented text
    #[arg(long, requires = "print")]
    pub json: bool,

    /// Levels to expand below the root when printing
    #[arg(long, value_name = "LEVELS", default_value_t = 8)]
    pub depth: usize,

    /// Path to the log file (default: ~/.cppview/cppview.log)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Minimum level written to the log file
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Output format for `--print`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrintFormat {
    Text,
    Json,
}

/// How the explorer presents the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Interactive,
    Print { depth: usize, format: PrintFormat },
}

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Workspace root {} is not accessible: {source}", path.display())]
    RootNotAccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Workspace root {} is not a directory", path.display())]
    RootNotDirectory { path: PathBuf },
}

/// Fully resolved explorer settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExplorerConfig {
    /// Canonical workspace root.
    pub root: PathBuf,
    pub output: OutputMode,
    pub log_file: PathBuf,
    pub log_level: Level,
}

impl ExplorerConfig {
    /// Resolves `cli` against `current_dir`.
    ///
    /// # Errors
    /// Returns an error when the root does not exist or is not a directory.
    pub fn from_cli(cli: Cli, current_dir: &Path) -> Result<Self, ConfigError> {
        let requested_root = cli
            .root
            .map_or_else(|| current_dir.to_path_buf(), |root| current_dir.join(root));
        let root = requested_root
            .canonicalize()
            .map_err(|source| ConfigError::RootNotAccessible {
                path: requested_root.clone(),
                source,
            })?;
        if !root.is_dir() {
            return Err(ConfigError::RootNotDirectory { path: root });
        }

        let output = if cli.print {
            let format = if cli.json {
                PrintFormat::Json
            } else {
                PrintFormat::Text
            };

            OutputMode::Print {
                depth: cli.depth,
                format,
            }
        } else {
            OutputMode::Interactive
        };

        Ok(Self {
            root,
            output,
            log_file: cli
                .log_file
                .unwrap_or_else(|| cppview_home().join(LOG_FILE)),
            log_level: cli.log_level.into(),
        })
    }
}

/// Returns the per-user state directory.
pub fn cppview_home() -> PathBuf {
    if let Some(home_dir) = dirs::home_dir() {
        return home_dir.join(CPPVIEW_DIR);
    }

    PathBuf::from(CPPVIEW_DIR)
}
