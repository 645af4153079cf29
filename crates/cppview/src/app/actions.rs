//! Create, rename, and delete actions that keep both sides of a split in step.
//!
//! None of these roll back: when the second side fails, the first side stays
//! changed.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::app::sibling::locate_sibling;
use crate::app::tree::CppTreeProvider;
use crate::domain::entry::{Entry, PairSide};
use crate::domain::pairing::{NewItemKind, plan_new_item_paths};
use crate::infra::error::FsError;
use crate::infra::fs::{DeleteOptions, FileSystem, RenameOptions, WriteOptions};

/// Pending rename waiting for the user's new name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenameRequest {
    pub target: Entry,
    pub sibling: Option<Entry>,
    /// Prompt pre-fill: the stem when a sibling exists, else the file name.
    pub initial_value: String,
}

/// Creates a folder or a group named `name` inside `dir`.
///
/// When `dir` holds `cpp`/`include` folders, one item goes into each.
/// When `dir` sits under one side of a split, the item is mirrored under the
/// other side. Each path is attempted independently; failures are logged and
/// skipped. Returns the paths that were created.
pub async fn make(
    provider: &CppTreeProvider,
    dir: &Entry,
    kind: NewItemKind,
    name: &str,
) -> Result<Vec<PathBuf>, FsError> {
    let children = provider.list_entries(&dir.path).await?;
    let creating_at_split = children.iter().any(|child| {
        child
            .file_name()
            .and_then(PairSide::from_folder_name)
            .is_some()
    });

    let file_system = provider.file_system();
    let mut created = Vec::new();
    for planned in plan_new_item_paths(&dir.path, kind, name, creating_at_split) {
        if planned.requires_existing_parent && !parent_exists(file_system, &planned.path).await {
            continue;
        }

        let result = match kind {
            NewItemKind::Folder => {
                file_system
                    .create_directory(planned.path.clone(), false)
                    .await
            }
            NewItemKind::Group => {
                file_system
                    .write(
                        planned.path.clone(),
                        Vec::new(),
                        WriteOptions {
                            create: true,
                            overwrite: false,
                        },
                    )
                    .await
            }
        };

        match result {
            Ok(()) => {
                info!(path = %planned.path.display(), ?kind, "created");
                created.push(planned.path);
            }
            Err(create_error) => {
                error!(path = %planned.path.display(), %create_error, "failed to create");
            }
        }
    }

    Ok(created)
}

/// Looks up the sibling of `target` and builds the rename prompt state.
pub async fn prepare_rename(file_system: &dyn FileSystem, target: Entry) -> RenameRequest {
    let sibling = locate_sibling(file_system, &target).await;
    let file_name = target.file_name().unwrap_or_default().to_string();
    let initial_value = if sibling.is_some() {
        target
            .path
            .file_stem()
            .map_or_else(|| file_name.clone(), |stem| stem.to_string_lossy().into_owned())
    } else {
        file_name
    };

    RenameRequest {
        target,
        sibling,
        initial_value,
    }
}

/// Applies `new_name` to a prepared rename.
///
/// With a sibling, `new_name` is a base name and each side keeps its own
/// extension; the sibling is renamed first. Without one, `new_name` replaces
/// the whole file name. An empty name renames nothing. Returns the new paths.
///
/// # Errors
/// Returns `FileExists` when a destination is taken, or the underlying
/// rename error. Sides renamed before the failure stay renamed.
pub async fn apply_rename(
    file_system: &dyn FileSystem,
    request: &RenameRequest,
    new_name: &str,
) -> Result<Vec<PathBuf>, FsError> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Ok(Vec::new());
    }

    let Some(sibling) = &request.sibling else {
        let renamed = rename_entry(file_system, &request.target.path, new_name).await?;

        return Ok(vec![renamed]);
    };

    let sibling_name = with_extension_of(new_name, &sibling.path);
    let target_name = with_extension_of(new_name, &request.target.path);
    let renamed_sibling = rename_entry(file_system, &sibling.path, &sibling_name).await?;
    let renamed_target = rename_entry(file_system, &request.target.path, &target_name).await?;

    Ok(vec![renamed_target, renamed_sibling])
}

/// Deletes `target` and, when it has one, its sibling. Returns the removed
/// paths.
///
/// # Errors
/// Returns the first delete error. A failing sibling delete leaves the
/// target deleted.
pub async fn delete(file_system: &dyn FileSystem, target: &Entry) -> Result<Vec<PathBuf>, FsError> {
    let sibling = locate_sibling(file_system, target).await;
    let options = DeleteOptions { recursive: true };

    file_system.delete(target.path.clone(), options).await?;
    info!(path = %target.path.display(), "deleted");
    let mut deleted = vec![target.path.clone()];

    if let Some(sibling) = sibling {
        file_system.delete(sibling.path.clone(), options).await?;
        info!(path = %sibling.path.display(), "deleted sibling");
        deleted.push(sibling.path);
    }

    Ok(deleted)
}

async fn parent_exists(file_system: &dyn FileSystem, path: &Path) -> bool {
    let Some(parent) = path.parent() else {
        return false;
    };

    file_system.exists(parent.to_path_buf()).await
}

/// Renames the node at `path` to `new_name` within the same directory.
async fn rename_entry(
    file_system: &dyn FileSystem,
    path: &Path,
    new_name: &str,
) -> Result<PathBuf, FsError> {
    let new_path = path.with_file_name(new_name);
    if new_path == path {
        return Ok(new_path);
    }
    if file_system.exists(new_path.clone()).await {
        return Err(FsError::FileExists { path: new_path });
    }

    file_system
        .rename(path.to_path_buf(), new_path.clone(), RenameOptions::default())
        .await?;
    info!(from = %path.display(), to = %new_path.display(), "renamed");

    Ok(new_path)
}

/// Returns `base_name` followed by the extension of `path`, if any.
fn with_extension_of(base_name: &str, path: &Path) -> String {
    match path.extension() {
        Some(extension) => format!("{base_name}.{}", extension.to_string_lossy()),
        None => base_name.to_string(),
    }
}
