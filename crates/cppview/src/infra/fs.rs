use std::ffi::OsString;
use std::fs::Metadata;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::domain::entry::EntryKind;
use crate::infra::error::FsError;

/// Boxed async result used by [`FileSystem`] trait methods.
pub type FsFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Node metadata returned by [`FileSystem::stat`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FileStat {
    pub kind: EntryKind,
    pub size: u64,
    /// Creation time in milliseconds since the Unix epoch.
    pub ctime: u64,
    /// Modification time in milliseconds since the Unix epoch.
    pub mtime: u64,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WriteOptions {
    pub create: bool,
    pub overwrite: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DeleteOptions {
    pub recursive: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RenameOptions {
    pub overwrite: bool,
}

/// Async filesystem boundary consumed by the tree provider and actions.
///
/// Production uses [`RealFileSystem`], while tests can inject
/// `MockFileSystem` to force failures that are awkward to reproduce on disk.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Lists the immediate children of `dir` as `(name, kind)` pairs in
    /// directory order. Names are returned as stored on disk, so joining one
    /// onto `dir` always yields the real path.
    ///
    /// # Errors
    /// Returns an error when `dir` cannot be read or a child cannot be
    /// inspected.
    fn list(&self, dir: PathBuf) -> FsFuture<Result<Vec<(OsString, EntryKind)>, FsError>>;

    /// Returns kind, size, and timestamps for `path`.
    ///
    /// # Errors
    /// Returns an error when `path` cannot be inspected.
    fn stat(&self, path: PathBuf) -> FsFuture<Result<FileStat, FsError>>;

    /// Returns whether anything exists at `path`.
    fn exists(&self, path: PathBuf) -> FsFuture<bool>;

    /// Reads the full contents of `path`.
    ///
    /// # Errors
    /// Returns an error when `path` cannot be read.
    fn read(&self, path: PathBuf) -> FsFuture<Result<Vec<u8>, FsError>>;

    /// Writes `content` to `path`.
    ///
    /// A missing file is only created with `options.create`, in which case
    /// missing parent directories are created too. An existing file is only
    /// replaced with `options.overwrite`.
    ///
    /// # Errors
    /// Returns `FileNotFound` or `FileExists` when `options` forbid the write,
    /// or the underlying write error.
    fn write(
        &self,
        path: PathBuf,
        content: Vec<u8>,
        options: WriteOptions,
    ) -> FsFuture<Result<(), FsError>>;

    /// Creates the directory at `path`, with its parents when `recursive`.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created.
    fn create_directory(&self, path: PathBuf, recursive: bool) -> FsFuture<Result<(), FsError>>;

    /// Removes `path`. A recursive delete removes whole trees and treats a
    /// missing path as already deleted.
    ///
    /// # Errors
    /// Returns an error when `path` cannot be removed.
    fn delete(&self, path: PathBuf, options: DeleteOptions) -> FsFuture<Result<(), FsError>>;

    /// Moves `old_path` to `new_path`, creating the target's parent when it
    /// is missing.
    ///
    /// # Errors
    /// Returns `FileExists` when the target exists and `options.overwrite` is
    /// not set, or the underlying rename error.
    fn rename(
        &self,
        old_path: PathBuf,
        new_path: PathBuf,
        options: RenameOptions,
    ) -> FsFuture<Result<(), FsError>>;
}

/// Production [`FileSystem`] backed by `tokio::fs`.
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn list(&self, dir: PathBuf) -> FsFuture<Result<Vec<(OsString, EntryKind)>, FsError>> {
        Box::pin(async move { list(dir).await })
    }

    fn stat(&self, path: PathBuf) -> FsFuture<Result<FileStat, FsError>> {
        Box::pin(async move { stat(&path).await })
    }

    fn exists(&self, path: PathBuf) -> FsFuture<bool> {
        Box::pin(async move { tokio::fs::try_exists(&path).await.unwrap_or(false) })
    }

    fn read(&self, path: PathBuf) -> FsFuture<Result<Vec<u8>, FsError>> {
        Box::pin(async move {
            tokio::fs::read(&path)
                .await
                .map_err(|error| FsError::from_io(error, &path))
        })
    }

    fn write(
        &self,
        path: PathBuf,
        content: Vec<u8>,
        options: WriteOptions,
    ) -> FsFuture<Result<(), FsError>> {
        Box::pin(async move { write(path, content, options).await })
    }

    fn create_directory(&self, path: PathBuf, recursive: bool) -> FsFuture<Result<(), FsError>> {
        Box::pin(async move { create_directory(&path, recursive).await })
    }

    fn delete(&self, path: PathBuf, options: DeleteOptions) -> FsFuture<Result<(), FsError>> {
        Box::pin(async move { delete(&path, options).await })
    }

    fn rename(
        &self,
        old_path: PathBuf,
        new_path: PathBuf,
        options: RenameOptions,
    ) -> FsFuture<Result<(), FsError>> {
        Box::pin(async move { rename(old_path, new_path, options).await })
    }
}

async fn list(dir: PathBuf) -> Result<Vec<(OsString, EntryKind)>, FsError> {
    let mut read_dir = tokio::fs::read_dir(&dir)
        .await
        .map_err(|error| FsError::from_io(error, &dir))?;

    let mut children = Vec::new();
    while let Some(child) = read_dir
        .next_entry()
        .await
        .map_err(|error| FsError::from_io(error, &dir))?
    {
        let name = child.file_name();
        let kind = stat(&child.path()).await?.kind;
        children.push((name, kind));
    }

    debug!(dir = %dir.display(), count = children.len(), "listed directory");

    Ok(children)
}

/// Stats `path`, following symlinks.
///
/// A dangling symlink is reported as [`EntryKind::SymbolicLink`] instead of
/// failing.
async fn stat(path: &Path) -> Result<FileStat, FsError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(file_stat(&metadata)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            let link_metadata = tokio::fs::symlink_metadata(path)
                .await
                .map_err(|_| FsError::from_io(error, path))?;

            Ok(file_stat(&link_metadata))
        }
        Err(error) => Err(FsError::from_io(error, path)),
    }
}

async fn write(path: PathBuf, content: Vec<u8>, options: WriteOptions) -> Result<(), FsError> {
    let exists = tokio::fs::try_exists(&path).await.unwrap_or(false);
    if exists {
        if !options.overwrite {
            return Err(FsError::FileExists { path });
        }
    } else {
        if !options.create {
            return Err(FsError::FileNotFound { path });
        }

        if let Some(parent) = path.parent() {
            create_directory(parent, true).await?;
        }
    }

    tokio::fs::write(&path, content)
        .await
        .map_err(|error| FsError::from_io(error, &path))?;
    debug!(path = %path.display(), "wrote file");

    Ok(())
}

async fn create_directory(path: &Path, recursive: bool) -> Result<(), FsError> {
    let result = if recursive {
        tokio::fs::create_dir_all(path).await
    } else {
        tokio::fs::create_dir(path).await
    };
    result.map_err(|error| FsError::from_io(error, path))?;
    debug!(path = %path.display(), recursive, "created directory");

    Ok(())
}

async fn delete(path: &Path, options: DeleteOptions) -> Result<(), FsError> {
    if !options.recursive {
        tokio::fs::remove_file(path)
            .await
            .map_err(|error| FsError::from_io(error, path))?;
        debug!(path = %path.display(), "deleted file");

        return Ok(());
    }

    let metadata = match tokio::fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(FsError::from_io(error, path)),
    };

    let result = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };
    result.map_err(|error| FsError::from_io(error, path))?;
    debug!(path = %path.display(), "deleted recursively");

    Ok(())
}

async fn rename(old_path: PathBuf, new_path: PathBuf, options: RenameOptions) -> Result<(), FsError> {
    if tokio::fs::try_exists(&new_path).await.unwrap_or(false) {
        if !options.overwrite {
            return Err(FsError::FileExists { path: new_path });
        }

        delete(&new_path, DeleteOptions { recursive: true }).await?;
    }

    if let Some(parent) = new_path.parent()
        && !tokio::fs::try_exists(parent).await.unwrap_or(false)
    {
        create_directory(parent, true).await?;
    }

    tokio::fs::rename(&old_path, &new_path)
        .await
        .map_err(|error| FsError::from_io(error, &old_path))?;
    debug!(
        from = %old_path.display(),
        to = %new_path.display(),
        "renamed"
    );

    Ok(())
}

fn file_stat(metadata: &Metadata) -> FileStat {
    let kind = if metadata.is_file() {
        EntryKind::File
    } else if metadata.is_dir() {
        EntryKind::Directory
    } else if metadata.is_symlink() {
        EntryKind::SymbolicLink
    } else {
        EntryKind::Unknown
    };
    let mtime = metadata.modified().ok();
    let ctime = metadata.created().ok().or(mtime);

    FileStat {
        kind,
        size: metadata.len(),
        ctime: epoch_millis(ctime),
        mtime: epoch_millis(mtime),
    }
}

fn epoch_millis(time: Option<SystemTime>) -> u64 {
    time.and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |duration| {
            u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
        })
}
