//! Path rules that relate headers under `include/` to sources under `cpp/`.
//!
//! Two lookups live here and they differ:
//! [`include_counterpart_candidate`] matches the first raw `include`
//! substring and only maps toward `cpp`, while [`sibling_candidate`] anchors
//! on whole path segments and works in both directions. The tree uses the
//! first; rename, delete, and create use the second.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::domain::entry::PairSide;

/// Extensions (without the dot) rendered as collapsible pair groups.
pub const GROUP_EXTENSIONS: [&str; 3] = ["cpp", "h", "hpp"];

/// What a create action produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NewItemKind {
    Folder,
    Group,
}

/// One path a create action wants to produce.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlannedPath {
    pub path: PathBuf,
    /// The path is only created when its parent directory already exists.
    pub requires_existing_parent: bool,
}

/// Returns whether `path` has one of the [`GROUP_EXTENSIONS`].
pub fn is_group_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| GROUP_EXTENSIONS.contains(&extension))
}

/// Builds the `cpp` counterpart candidate for a header path.
///
/// Finds the first `include` substring anywhere in the path, keeps what
/// precedes it, inserts a `cpp` segment, appends the rest of the
/// extension-stripped path and finally `.cpp`. Returns `None` when the path
/// has no `include` substring.
pub fn include_counterpart_candidate(path: &Path) -> Option<PathBuf> {
    let include = PairSide::Include.folder_name();
    let path_text = path.to_string_lossy();
    let marker_index = path_text.find(include)?;
    let stripped_text = strip_extension(path);
    let remainder = stripped_text
        .get(marker_index + include.len()..)
        .unwrap_or_default();

    let mut candidate = join_swapped(
        &path_text[..marker_index],
        PairSide::Cpp.folder_name(),
        remainder,
    );
    append_extension(&mut candidate, PairSide::Cpp.extension());

    Some(candidate)
}

/// Builds the mirrored path of `path` when it lives under a `side` segment.
///
/// The segment must appear as `<sep>cpp<sep>` or `<sep>include<sep>`. The
/// segment is swapped for the other side's folder and, when `path` has an
/// extension, it is replaced by the other side's extension. Paths without an
/// extension (directories, mostly) keep none.
pub fn sibling_candidate(path: &Path, side: PairSide) -> Option<PathBuf> {
    let folder_start = find_segment(path, side)?;
    let path_text = path.to_string_lossy();
    let has_extension = path.extension().is_some();
    let stripped_text = if has_extension {
        strip_extension(path)
    } else {
        path_text.to_string()
    };
    let remainder = stripped_text
        .get(folder_start + side.folder_name().len()..)
        .unwrap_or_default();

    let mut candidate = join_swapped(
        &path_text[..folder_start],
        side.other().folder_name(),
        remainder,
    );
    if has_extension {
        append_extension(&mut candidate, side.other().extension());
    }

    Some(candidate)
}

/// Plans the paths a create action writes inside `dir`.
///
/// When `creating_at_split` is set, `dir` holds `cpp`/`include` folders and
/// one path goes into each. Otherwise the item goes into `dir` itself and,
/// when `dir` sits under a `cpp` or `include` segment, a mirrored item goes
/// under the other segment.
pub fn plan_new_item_paths(
    dir: &Path,
    kind: NewItemKind,
    name: &str,
    creating_at_split: bool,
) -> Vec<PlannedPath> {
    let is_group = kind == NewItemKind::Group;

    if creating_at_split {
        return PairSide::ALL
            .into_iter()
            .map(|side| {
                let mut path = dir.join(side.folder_name()).join(name);
                if is_group {
                    append_extension(&mut path, side.extension());
                }

                PlannedPath {
                    path,
                    requires_existing_parent: is_group,
                }
            })
            .collect();
    }

    let mut primary = dir.join(name);
    let mut mirrored = None;
    for side in PairSide::ALL {
        let Some(folder_start) = find_segment(dir, side) else {
            continue;
        };

        let dir_text = dir.to_string_lossy();
        let remainder = dir_text
            .get(folder_start + side.folder_name().len()..)
            .unwrap_or_default();
        let mut path = join_swapped(
            &dir_text[..folder_start],
            side.other().folder_name(),
            remainder,
        )
        .join(name);
        if is_group {
            append_extension(&mut path, side.other().extension());
            append_extension(&mut primary, side.extension());
        }
        mirrored = Some(PlannedPath {
            path,
            requires_existing_parent: is_group,
        });

        break;
    }

    let mut planned = vec![PlannedPath {
        path: primary,
        requires_existing_parent: false,
    }];
    planned.extend(mirrored);

    planned
}

/// Returns the byte offset where the `side` folder name starts, when the path
/// contains it as a full segment.
fn find_segment(path: &Path, side: PairSide) -> Option<usize> {
    let needle = format!("{MAIN_SEPARATOR}{}{MAIN_SEPARATOR}", side.folder_name());

    path.to_string_lossy()
        .find(&needle)
        .map(|index| index + MAIN_SEPARATOR.len_utf8())
}

/// Returns `path` as text with its last extension removed.
fn strip_extension(path: &Path) -> String {
    path.with_extension("").to_string_lossy().into_owned()
}

/// Joins `prefix`, `folder`, and the relative `remainder` into one path.
fn join_swapped(prefix: &str, folder: &str, remainder: &str) -> PathBuf {
    let mut joined = PathBuf::from(prefix).join(folder);
    let remainder = remainder.trim_start_matches(std::path::is_separator);
    if !remainder.is_empty() {
        joined.push(remainder);
    }

    joined
}

/// Appends `.extension` to the last component of `path`.
fn append_extension(path: &mut PathBuf, extension: &str) {
    path.as_mut_os_string().push(format!(".{extension}"));
}
