//! Recursive filesystem watching bridged into a tokio channel.

use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::infra::error::FsError;

/// What happened to a watched path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileChangeKind {
    Changed,
    Created,
    Deleted,
}

/// One change reported by [`watch`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileChangeEvent {
    pub kind: FileChangeKind,
    pub path: PathBuf,
}

/// Keeps the underlying watcher alive; dropping it stops the event stream.
pub struct FsWatcher {
    _watcher: RecommendedWatcher,
}

/// Starts watching `root` and returns the guard with its event receiver.
///
/// Every change is forwarded as-is: no path filtering, no debouncing.
///
/// # Errors
/// Returns an error when the watcher backend cannot be created or `root`
/// cannot be watched.
pub fn watch(
    root: &Path,
    recursive: bool,
) -> Result<(FsWatcher, mpsc::UnboundedReceiver<FileChangeEvent>), FsError> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        match result {
            Ok(event) => {
                for change in change_events(event) {
                    if event_tx.send(change).is_err() {
                        break;
                    }
                }
            }
            Err(error) => warn!(%error, "watcher reported an error"),
        }
    })
    .map_err(|error| watch_error(error, root))?;

    let mode = if recursive {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };
    watcher
        .watch(root, mode)
        .map_err(|error| watch_error(error, root))?;
    debug!(root = %root.display(), recursive, "watching workspace");

    Ok((FsWatcher { _watcher: watcher }, event_rx))
}

/// Converts one backend event into change events, one per affected path.
///
/// Renames are reported as `Created` when the path still exists afterwards
/// and `Deleted` otherwise. Access events are dropped.
fn change_events(event: Event) -> Vec<FileChangeEvent> {
    let Event { kind, paths, .. } = event;

    paths
        .into_iter()
        .filter_map(|path| {
            let kind = match kind {
                EventKind::Access(_) => return None,
                EventKind::Create(_) => FileChangeKind::Created,
                EventKind::Remove(_) => FileChangeKind::Deleted,
                EventKind::Modify(ModifyKind::Name(_)) => {
                    if path.exists() {
                        FileChangeKind::Created
                    } else {
                        FileChangeKind::Deleted
                    }
                }
                EventKind::Modify(_) | EventKind::Any | EventKind::Other => {
                    FileChangeKind::Changed
                }
            };

            Some(FileChangeEvent { kind, path })
        })
        .collect()
}

fn watch_error(error: notify::Error, root: &Path) -> FsError {
    match error.kind {
        notify::ErrorKind::Io(source) => FsError::from_io(source, root),
        notify::ErrorKind::PathNotFound => FsError::FileNotFound {
            path: root.to_path_buf(),
        },
        other => FsError::Watch(format!("{other:?}")),
    }
}
