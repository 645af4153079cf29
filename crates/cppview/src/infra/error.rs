use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Filesystem failures surfaced to the host.
///
/// OS errors are translated once, at the filesystem boundary, by
/// [`FsError::from_io`]. Kinds without a dedicated variant pass through as
/// [`FsError::Unknown`] with the original error attached.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("File Not Found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("File Already Exists: {}", path.display())]
    FileExists { path: PathBuf },
    #[error("File Is A Directory: {}", path.display())]
    FileIsADirectory { path: PathBuf },
    #[error("No Permissions: {}", path.display())]
    NoPermissions { path: PathBuf },
    #[error("Operation cancelled")]
    Cancelled,
    #[error("{}: {source}", path.display())]
    Unknown {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Watcher failed: {0}")]
    Watch(String),
}

impl FsError {
    /// Maps an OS error raised while operating on `path`.
    pub fn from_io(error: io::Error, path: &Path) -> Self {
        let path = path.to_path_buf();

        match error.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound { path },
            io::ErrorKind::AlreadyExists => Self::FileExists { path },
            io::ErrorKind::IsADirectory => Self::FileIsADirectory { path },
            io::ErrorKind::PermissionDenied => Self::NoPermissions { path },
            _ => Self::Unknown {
                path,
                source: error,
            },
        }
    }
}

/// Returns [`FsError::Cancelled`] once `token` has been cancelled.
///
/// # Errors
/// Returns an error when cancellation was requested.
pub fn check_cancellation(token: &CancellationToken) -> Result<(), FsError> {
    if token.is_cancelled() {
        return Err(FsError::Cancelled);
    }

    Ok(())
}
