use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entry::{Entry, EntryKind, PairSide, sort_entries};
use crate::domain::pairing::{include_counterpart_candidate, is_group_extension};
use crate::domain::row::{RowCommand, TreeRow};
use crate::infra::error::FsError;
use crate::infra::fs::FileSystem;

/// Tree data source that groups `include/` headers with their `cpp/`
/// sources.
///
/// Holds no tree state: every call lists the filesystem again.
pub struct CppTreeProvider {
    file_system: Arc<dyn FileSystem>,
    root: PathBuf,
}

impl CppTreeProvider {
    /// Creates a provider for the workspace at `root`.
    pub fn new(file_system: Arc<dyn FileSystem>, root: PathBuf) -> Self {
        Self { file_system, root }
    }

    /// Returns the workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the workspace root as a directory entry.
    pub fn root_entry(&self) -> Entry {
        Entry::new(self.root.clone(), EntryKind::Directory)
    }

    /// Returns the filesystem this provider reads from.
    pub fn file_system(&self) -> &dyn FileSystem {
        self.file_system.as_ref()
    }

    /// Lists the immediate children of `dir` in listing order.
    ///
    /// # Errors
    /// Returns an error when the directory or one of its children cannot be
    /// read.
    pub async fn list_entries(&self, dir: &Path) -> Result<Vec<Entry>, FsError> {
        let children = self.file_system.list(dir.to_path_buf()).await?;
        let mut entries: Vec<Entry> = children
            .into_iter()
            .map(|(name, kind)| Entry::new(dir.join(name), kind))
            .collect();
        sort_entries(&mut entries);

        Ok(entries)
    }

    /// Returns the children of `node`, or the workspace listing for `None`.
    ///
    /// Files resolve to their pair halves, directories go through folder
    /// grouping, and other kinds have no children. The workspace root itself
    /// is listed without grouping.
    ///
    /// # Errors
    /// Returns an error when a directory on the way cannot be listed.
    pub async fn children(&self, node: Option<&Entry>) -> Result<Vec<Entry>, FsError> {
        let Some(entry) = node else {
            return self.list_entries(&self.root).await;
        };

        match entry.kind {
            EntryKind::File => Ok(self.resolve_pair(entry).await),
            EntryKind::Directory => self.group_folder(&entry.path).await,
            EntryKind::SymbolicLink | EntryKind::Unknown => Ok(Vec::new()),
        }
    }

    /// Resolves the header/source pair for a file entry.
    ///
    /// The entry itself always comes back tagged `include`. A `cpp`-tagged
    /// counterpart follows when the path contains `include` and the mapped
    /// `.cpp` file exists.
    pub async fn resolve_pair(&self, entry: &Entry) -> Vec<Entry> {
        let mut pair =
            vec![Entry::new(entry.path.clone(), EntryKind::File).with_title(PairSide::Include)];

        let Some(candidate) = include_counterpart_candidate(&entry.path) else {
            return pair;
        };

        if self.file_system.exists(candidate.clone()).await {
            pair.push(Entry::new(candidate, EntryKind::File).with_title(PairSide::Cpp));
        }

        pair
    }

    /// Lists `dir`, replacing it with the contents of its `cpp`/`include`
    /// folders when it has any.
    ///
    /// When both folders are present the `include` listing wins, because it
    /// is visited last in listing order and always overrides an earlier
    /// match. Other siblings of those folders are not shown.
    async fn group_folder(&self, dir: &Path) -> Result<Vec<Entry>, FsError> {
        let entries = self.list_entries(dir).await?;

        let mut grouped = None;
        for entry in &entries {
            let Some(side) = entry.file_name().and_then(PairSide::from_folder_name) else {
                continue;
            };

            if grouped.is_none() || side == PairSide::Include {
                grouped = Some(Box::pin(self.children(Some(entry))).await?);
            }
        }

        if let Some(children) = grouped {
            debug!(dir = %dir.display(), "collapsed split folder");

            return Ok(children);
        }

        Ok(entries)
    }

    /// Builds the display row for `entry`.
    pub async fn tree_item(&self, entry: &Entry) -> TreeRow {
        match entry.kind {
            EntryKind::Directory => TreeRow::directory(&entry.path),
            EntryKind::File if entry.title.is_none() && is_group_extension(&entry.path) => {
                self.group_row(entry).await
            }
            EntryKind::File => TreeRow::file(&entry.path),
            EntryKind::SymbolicLink | EntryKind::Unknown => {
                warn!(path = %entry.path.display(), kind = ?entry.kind, "entry kind has no row");

                TreeRow::error()
            }
        }
    }

    async fn group_row(&self, entry: &Entry) -> TreeRow {
        let name = entry
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pair = self.resolve_pair(entry).await;
        let include_path = pair
            .iter()
            .find(|half| half.title == Some(PairSide::Include))
            .map_or_else(|| entry.path.clone(), |half| half.path.clone());
        let cpp_path = pair
            .into_iter()
            .find(|half| half.title == Some(PairSide::Cpp))
            .map(|half| half.path);

        let command = match cpp_path {
            Some(cpp_path) => RowCommand::OpenFilesSplit(include_path, cpp_path),
            None => RowCommand::OpenFile(include_path),
        };

        TreeRow::group(name, command)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::domain::row::{Collapsible, RowContext, RowLabel};
    use crate::infra::fs::{MockFileSystem, RealFileSystem};

    fn provider_for(root: &Path) -> CppTreeProvider {
        CppTreeProvider::new(Arc::new(RealFileSystem), root.to_path_buf())
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test expectation should hold");
        }
        fs::write(path, "").expect("test expectation should hold");
    }

    fn names(entries: &[Entry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| entry.file_name().unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_list_entries_sorts_directories_first() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        touch(&temp_dir.path().join("b.txt"));
        touch(&temp_dir.path().join("a.txt"));
        fs::create_dir(temp_dir.path().join("A")).expect("test expectation should hold");
        let provider = provider_for(temp_dir.path());

        // Act
        let entries = provider
            .list_entries(temp_dir.path())
            .await
            .expect("test expectation should hold");

        // Assert
        assert_eq!(names(&entries), vec!["A", "a.txt", "b.txt"]);
        assert_eq!(entries[0].kind, EntryKind::Directory);
    }

    #[tokio::test]
    async fn test_resolve_pair_with_existing_source() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let header = temp_dir.path().join("include/foo.h");
        let source = temp_dir.path().join("cpp/foo.cpp");
        touch(&header);
        touch(&source);
        let provider = provider_for(temp_dir.path());

        // Act
        let pair = provider
            .resolve_pair(&Entry::new(header.clone(), EntryKind::File))
            .await;

        // Assert
        assert_eq!(
            pair,
            vec![
                Entry::new(header, EntryKind::File).with_title(PairSide::Include),
                Entry::new(source, EntryKind::File).with_title(PairSide::Cpp),
            ]
        );
    }

    #[tokio::test]
    async fn test_resolve_pair_without_source_returns_header_only() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let header = temp_dir.path().join("include/bar.h");
        touch(&header);
        touch(&temp_dir.path().join("cpp/foo.cpp"));
        let provider = provider_for(temp_dir.path());

        // Act
        let pair = provider
            .resolve_pair(&Entry::new(header.clone(), EntryKind::File))
            .await;

        // Assert
        assert_eq!(
            pair,
            vec![Entry::new(header, EntryKind::File).with_title(PairSide::Include)]
        );
    }

    #[tokio::test]
    async fn test_resolve_pair_is_idempotent() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let header = temp_dir.path().join("include/foo.h");
        touch(&header);
        touch(&temp_dir.path().join("cpp/foo.cpp"));
        let provider = provider_for(temp_dir.path());
        let entry = Entry::new(header, EntryKind::File);

        // Act
        let first = provider.resolve_pair(&entry).await;
        let second = provider.resolve_pair(&entry).await;

        // Assert
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_resolve_pair_from_source_side_does_not_pair() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let workspace = temp_dir.path().join("ws");
        let source = workspace.join("cpp/foo.cpp");
        touch(&source);
        touch(&workspace.join("include/foo.h"));
        let provider = provider_for(&workspace);

        // Act
        let pair = provider
            .resolve_pair(&Entry::new(source.clone(), EntryKind::File))
            .await;

        // Assert
        assert_eq!(
            pair,
            vec![Entry::new(source, EntryKind::File).with_title(PairSide::Include)]
        );
    }

    #[tokio::test]
    async fn test_children_of_split_container_shows_include_contents() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let lib = temp_dir.path().join("lib");
        touch(&lib.join("include/foo.h"));
        touch(&lib.join("include/bar.h"));
        touch(&lib.join("cpp/foo.cpp"));
        touch(&lib.join("README.md"));
        let provider = provider_for(temp_dir.path());

        // Act
        let children = provider
            .children(Some(&Entry::new(lib, EntryKind::Directory)))
            .await
            .expect("test expectation should hold");

        // Assert
        assert_eq!(names(&children), vec!["bar.h", "foo.h"]);
        assert!(children.iter().all(|entry| entry.file_name() != Some("include")));
    }

    #[tokio::test]
    async fn test_children_of_cpp_only_container_shows_cpp_contents() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let lib = temp_dir.path().join("lib");
        touch(&lib.join("cpp/main.cpp"));
        let provider = provider_for(temp_dir.path());

        // Act
        let children = provider
            .children(Some(&Entry::new(lib, EntryKind::Directory)))
            .await
            .expect("test expectation should hold");

        // Assert
        assert_eq!(names(&children), vec!["main.cpp"]);
    }

    #[tokio::test]
    async fn test_children_of_plain_directory_is_listing() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let docs = temp_dir.path().join("docs");
        touch(&docs.join("b.md"));
        touch(&docs.join("A.md"));
        fs::create_dir_all(docs.join("img")).expect("test expectation should hold");
        let provider = provider_for(temp_dir.path());

        // Act
        let children = provider
            .children(Some(&Entry::new(docs.clone(), EntryKind::Directory)))
            .await
            .expect("test expectation should hold");
        let listing = provider
            .list_entries(&docs)
            .await
            .expect("test expectation should hold");

        // Assert
        assert_eq!(children, listing);
        assert_eq!(names(&children), vec!["img", "A.md", "b.md"]);
    }

    #[tokio::test]
    async fn test_children_of_empty_directory_is_empty() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let empty = temp_dir.path().join("empty");
        fs::create_dir(&empty).expect("test expectation should hold");
        let provider = provider_for(temp_dir.path());

        // Act
        let children = provider
            .children(Some(&Entry::new(empty, EntryKind::Directory)))
            .await
            .expect("test expectation should hold");

        // Assert
        assert!(children.is_empty());
    }

    #[tokio::test]
    async fn test_children_of_root_is_not_grouped() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        touch(&temp_dir.path().join("include/foo.h"));
        touch(&temp_dir.path().join("cpp/foo.cpp"));
        let provider = provider_for(temp_dir.path());

        // Act
        let children = provider
            .children(None)
            .await
            .expect("test expectation should hold");

        // Assert
        assert_eq!(names(&children), vec!["cpp", "include"]);
    }

    #[tokio::test]
    async fn test_children_propagates_listing_errors() {
        // Arrange
        let mut file_system = MockFileSystem::new();
        file_system.expect_list().times(1).returning(|dir| {
            Box::pin(async move { Err(FsError::NoPermissions { path: dir }) })
        });
        let provider = CppTreeProvider::new(Arc::new(file_system), PathBuf::from("/ws"));

        // Act
        let result = provider
            .children(Some(&Entry::new("/ws/locked", EntryKind::Directory)))
            .await;

        // Assert
        assert!(matches!(result, Err(FsError::NoPermissions { .. })));
    }

    #[tokio::test]
    async fn test_tree_item_for_group_with_both_sides_opens_split() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let header = temp_dir.path().join("include/foo.h");
        let source = temp_dir.path().join("cpp/foo.cpp");
        touch(&header);
        touch(&source);
        let provider = provider_for(temp_dir.path());

        // Act
        let row = provider
            .tree_item(&Entry::new(header.clone(), EntryKind::File))
            .await;

        // Assert
        assert_eq!(row.label, RowLabel::Text("foo".to_string()));
        assert_eq!(row.collapsible, Collapsible::Collapsed);
        assert_eq!(row.context, Some(RowContext::Group));
        assert_eq!(row.command, Some(RowCommand::OpenFilesSplit(header, source)));
    }

    #[tokio::test]
    async fn test_tree_item_for_lone_header_opens_single_file() {
        // Arrange
        let mut file_system = MockFileSystem::new();
        file_system
            .expect_exists()
            .times(1)
            .returning(|_| Box::pin(async { false }));
        let provider = CppTreeProvider::new(Arc::new(file_system), PathBuf::from("/ws"));
        let header = PathBuf::from("/ws/include/bar.hpp");

        // Act
        let row = provider
            .tree_item(&Entry::new(header.clone(), EntryKind::File))
            .await;

        // Assert
        assert_eq!(row.label, RowLabel::Text("bar".to_string()));
        assert_eq!(row.command, Some(RowCommand::OpenFile(header)));
    }

    #[tokio::test]
    async fn test_tree_item_for_pair_half_is_plain_file_row() {
        // Arrange
        let provider = CppTreeProvider::new(Arc::new(MockFileSystem::new()), PathBuf::from("/ws"));
        let source = PathBuf::from("/ws/cpp/foo.cpp");
        let entry = Entry::new(source.clone(), EntryKind::File).with_title(PairSide::Cpp);

        // Act
        let row = provider.tree_item(&entry).await;

        // Assert
        assert_eq!(row.label, RowLabel::Resource(source.clone()));
        assert_eq!(row.context, Some(RowContext::Sub));
        assert_eq!(row.command, Some(RowCommand::OpenFile(source)));
    }

    #[tokio::test]
    async fn test_tree_item_for_directory_and_unknown() {
        // Arrange
        let provider = CppTreeProvider::new(Arc::new(MockFileSystem::new()), PathBuf::from("/ws"));

        // Act
        let directory_row = provider
            .tree_item(&Entry::new("/ws/docs", EntryKind::Directory))
            .await;
        let unknown_row = provider
            .tree_item(&Entry::new("/ws/fifo", EntryKind::Unknown))
            .await;

        // Assert
        assert_eq!(directory_row.collapsible, Collapsible::Collapsed);
        assert_eq!(directory_row.command, None);
        assert_eq!(unknown_row, TreeRow::error());
    }
}
