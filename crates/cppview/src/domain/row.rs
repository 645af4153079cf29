use std::path::{Path, PathBuf};

use serde::Serialize;

/// Label shown for one tree row.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLabel {
    /// Label derived from a resource path; hosts display its file name.
    Resource(PathBuf),
    /// Literal label text.
    Text(String),
}

impl RowLabel {
    /// Returns the text a host displays for this label.
    pub fn display_text(&self) -> String {
        match self {
            Self::Resource(path) => path
                .file_name()
                .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
                .into_owned(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Whether a row can be expanded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collapsible {
    None,
    Collapsed,
}

/// Action bound to a row.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "command", content = "paths")]
pub enum RowCommand {
    /// Shows one file in the primary view.
    OpenFile(PathBuf),
    /// Shows the first file in the primary view and the second in the
    /// secondary view.
    OpenFilesSplit(PathBuf, PathBuf),
}

impl RowCommand {
    /// Returns the primary-view path of this command.
    pub fn primary_path(&self) -> &Path {
        match self {
            Self::OpenFile(path) | Self::OpenFilesSplit(path, _) => path,
        }
    }
}

/// Context tag hosts use to pick row-specific actions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowContext {
    /// A collapsible header/source group.
    Group,
    /// A plain file or a resolved half of a group.
    Sub,
}

/// Display row for one entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TreeRow {
    pub label: RowLabel,
    pub collapsible: Collapsible,
    pub command: Option<RowCommand>,
    pub context: Option<RowContext>,
    pub file_icon: bool,
}

impl TreeRow {
    /// Row for a directory.
    pub fn directory(path: &Path) -> Self {
        Self {
            label: RowLabel::Resource(path.to_path_buf()),
            collapsible: Collapsible::Collapsed,
            command: None,
            context: None,
            file_icon: false,
        }
    }

    /// Row for a header/source group labelled `name`.
    pub fn group(name: String, command: RowCommand) -> Self {
        Self {
            label: RowLabel::Text(name),
            collapsible: Collapsible::Collapsed,
            command: Some(command),
            context: Some(RowContext::Group),
            file_icon: true,
        }
    }

    /// Row for a single file.
    pub fn file(path: &Path) -> Self {
        Self {
            label: RowLabel::Resource(path.to_path_buf()),
            collapsible: Collapsible::None,
            command: Some(RowCommand::OpenFile(path.to_path_buf())),
            context: Some(RowContext::Sub),
            file_icon: false,
        }
    }

    /// Non-interactive row for entries that cannot be shown.
    pub fn error() -> Self {
        Self {
            label: RowLabel::Text("error".to_string()),
            collapsible: Collapsible::None,
            command: None,
            context: None,
            file_icon: false,
        }
    }

    pub fn is_collapsible(&self) -> bool {
        self.collapsible == Collapsible::Collapsed
    }
}
