use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Kind of a filesystem node as reported by the filesystem capability.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Unknown,
    File,
    Directory,
    SymbolicLink,
}

impl EntryKind {
    /// Returns the numeric file-type code used for listing order.
    ///
    /// Codes follow the editor file-type convention; higher codes sort first,
    /// which places directories before files.
    pub fn type_code(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::File => 1,
            Self::Directory => 2,
            Self::SymbolicLink => 64,
        }
    }
}

/// One half of a header/source pair.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairSide {
    Cpp,
    Include,
}

impl PairSide {
    /// Sides in the order segment lookups probe them.
    pub const ALL: [Self; 2] = [Self::Cpp, Self::Include];

    /// Returns the directory name holding this side of a pair.
    pub fn folder_name(self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
            Self::Include => "include",
        }
    }

    /// Returns the file extension (without the dot) used by this side.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
            Self::Include => "h",
        }
    }

    /// Returns the opposite side of the pair.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Cpp => Self::Include,
            Self::Include => Self::Cpp,
        }
    }

    /// Returns the side whose folder name equals `name`.
    pub fn from_folder_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|side| side.folder_name() == name)
    }
}

impl fmt::Display for PairSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder_name())
    }
}

/// A listed or resolved filesystem node.
///
/// Entries are rebuilt on every tree request. `title` is set only on the
/// resolved halves of a pair, never on plain listing results.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub title: Option<PairSide>,
}

impl Entry {
    /// Creates an untitled entry.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
            title: None,
        }
    }

    /// Tags this entry as one resolved half of a pair.
    #[must_use]
    pub fn with_title(mut self, side: PairSide) -> Self {
        self.title = Some(side);

        self
    }

    /// Returns the final path component as UTF-8, when it has one.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Orders entries for directory listings.
///
/// Entries of different kinds sort by descending type code. Entries of the
/// same kind sort by their lowercased full path.
pub fn compare_entries(first: &Entry, second: &Entry) -> Ordering {
    if first.kind == second.kind {
        let first_path = first.path.to_string_lossy().to_lowercase();
        let second_path = second.path.to_string_lossy().to_lowercase();

        return first_path.cmp(&second_path);
    }

    second.kind.type_code().cmp(&first.kind.type_code())
}

/// Sorts `entries` in listing order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(compare_entries);
}
