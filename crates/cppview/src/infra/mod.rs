//! Infrastructure adapters for the filesystem, watching, and logging.

pub mod error;
pub mod fs;
/// File-backed `tracing` subscriber setup.
pub mod logging;
pub mod watcher;
