//! Explorer state and the operations the runtime drives it with.

pub mod actions;
pub mod rows;
pub mod sibling;
pub mod tree;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::app::actions::RenameRequest;
use crate::app::rows::{NodeKey, VisibleRow, collect_rows};
use crate::app::tree::CppTreeProvider;
use crate::domain::entry::Entry;
use crate::domain::input::InputState;
use crate::domain::pairing::NewItemKind;
use crate::domain::row::RowCommand;
use crate::infra::error::{FsError, check_cancellation};
use crate::infra::watcher::{FileChangeEvent, FileChangeKind};
use crate::ui::state::app_mode::{AppMode, PromptPurpose};

/// Contents of one file shown in a document pane.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DocumentView {
    pub path: PathBuf,
    pub content: String,
    pub size: u64,
    /// Modification time in milliseconds since the Unix epoch.
    pub modified_at: u64,
    pub scroll_offset: u16,
}

/// Explorer application state.
///
/// Only expansion state is remembered between refreshes; rows are rebuilt
/// from the filesystem every time.
pub struct App {
    pub mode: AppMode,
    pub rows: Vec<VisibleRow>,
    pub selected_index: usize,
    pub primary_view: Option<DocumentView>,
    pub secondary_view: Option<DocumentView>,
    pub status_message: Option<String>,
    expanded: HashSet<NodeKey>,
    provider: CppTreeProvider,
    shutdown: CancellationToken,
}

impl App {
    /// Creates an explorer for `provider` with nothing loaded yet.
    pub fn new(provider: CppTreeProvider) -> Self {
        Self {
            mode: AppMode::Explorer,
            rows: Vec::new(),
            selected_index: 0,
            primary_view: None,
            secondary_view: None,
            status_message: None,
            expanded: HashSet::new(),
            provider,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn provider(&self) -> &CppTreeProvider {
        &self.provider
    }

    pub fn workspace_root(&self) -> &Path {
        self.provider.root()
    }

    /// Cancels pending work and asks the runtime loop to stop.
    pub fn request_shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub fn selected_row(&self) -> Option<&VisibleRow> {
        self.rows.get(self.selected_index)
    }

    /// Rebuilds the visible rows and keeps the selection on the same node
    /// when it still exists.
    pub async fn refresh(&mut self) {
        match self.try_refresh().await {
            Ok(()) => {}
            Err(FsError::Cancelled) => debug!("refresh cancelled"),
            Err(refresh_error) => {
                error!(%refresh_error, "failed to refresh tree");
                self.status_message = Some(refresh_error.to_string());
            }
        }
    }

    async fn try_refresh(&mut self) -> Result<(), FsError> {
        check_cancellation(&self.shutdown)?;

        let selected_key = self.selected_row().map(VisibleRow::key);
        let expanded = &self.expanded;
        let rows = collect_rows(&self.provider, |entry, _| {
            expanded.contains(&NodeKey::of(entry))
        })
        .await?;
        check_cancellation(&self.shutdown)?;

        self.rows = rows;
        self.selected_index = selected_key
            .and_then(|key| self.rows.iter().position(|row| row.key() == key))
            .unwrap_or(self.selected_index)
            .min(self.rows.len().saturating_sub(1));

        Ok(())
    }

    /// Moves the selection by `offset` rows, clamped to the list.
    pub fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            return;
        }

        self.selected_index = if offset.is_negative() {
            self.selected_index.saturating_sub(offset.unsigned_abs())
        } else {
            self.selected_index
                .saturating_add(offset.unsigned_abs())
                .min(self.rows.len() - 1)
        };
    }

    /// Runs the selected row's command, or toggles it when it has none.
    pub async fn activate_selected(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };

        match &row.row.command {
            Some(command) => self.open_command(command).await,
            None if row.row.is_collapsible() => self.set_expanded(&row, !row.is_expanded).await,
            None => {}
        }
    }

    pub async fn expand_selected(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };

        if row.row.is_collapsible() && !row.is_expanded {
            self.set_expanded(&row, true).await;
        }
    }

    /// Collapses the selected node, or selects its parent row when it is
    /// already collapsed.
    pub async fn collapse_selected(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };

        if row.is_expanded {
            self.set_expanded(&row, false).await;

            return;
        }

        if let Some(parent_index) = self.parent_index(self.selected_index) {
            self.selected_index = parent_index;
        }
    }

    async fn set_expanded(&mut self, row: &VisibleRow, is_expanded: bool) {
        if is_expanded {
            self.expanded.insert(row.key());
        } else {
            self.expanded.remove(&row.key());
        }

        self.refresh().await;
    }

    /// Opens the file(s) named by `command` in the document panes.
    pub async fn open_command(&mut self, command: &RowCommand) {
        let result = match command {
            RowCommand::OpenFile(path) => self.load_document(path).await.map(|view| (view, None)),
            RowCommand::OpenFilesSplit(primary, secondary) => {
                match self.load_document(primary).await {
                    Ok(primary_view) => self
                        .load_document(secondary)
                        .await
                        .map(|secondary_view| (primary_view, Some(secondary_view))),
                    Err(open_error) => Err(open_error),
                }
            }
        };

        match result {
            Ok((primary_view, secondary_view)) => {
                debug!(
                    path = %primary_view.path.display(),
                    split = secondary_view.is_some(),
                    "opened document"
                );
                self.primary_view = Some(primary_view);
                self.secondary_view = secondary_view;
                self.status_message = None;
            }
            Err(open_error) => {
                error!(%open_error, "failed to open document");
                self.status_message = Some(open_error.to_string());
            }
        }
    }

    async fn load_document(&self, path: &Path) -> Result<DocumentView, FsError> {
        let file_system = self.provider.file_system();
        let bytes = file_system.read(path.to_path_buf()).await?;
        let stat = file_system.stat(path.to_path_buf()).await?;

        Ok(DocumentView {
            path: path.to_path_buf(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
            size: stat.size,
            modified_at: stat.mtime,
            scroll_offset: 0,
        })
    }

    /// Scrolls the primary document pane by `offset` lines.
    pub fn scroll_primary_view(&mut self, offset: i16) {
        let Some(view) = &mut self.primary_view else {
            return;
        };

        view.scroll_offset = if offset.is_negative() {
            view.scroll_offset.saturating_sub(offset.unsigned_abs())
        } else {
            view.scroll_offset.saturating_add(offset.unsigned_abs())
        };
    }

    /// Returns the directory new items are created in: the selected
    /// directory, else its nearest directory ancestor row, else the root.
    pub fn new_item_target(&self) -> Entry {
        let Some(selected) = self.selected_row() else {
            return self.provider.root_entry();
        };

        if selected.entry.is_dir() {
            return selected.entry.clone();
        }

        let mut index = self.selected_index;
        while let Some(parent_index) = self.parent_index(index) {
            let parent = &self.rows[parent_index];
            if parent.entry.is_dir() {
                return parent.entry.clone();
            }
            index = parent_index;
        }

        self.provider.root_entry()
    }

    /// Opens the name prompt for a new folder or group.
    pub fn begin_new_item(&mut self, kind: NewItemKind) {
        self.mode = AppMode::Prompt {
            purpose: PromptPurpose::NewItem {
                dir: self.new_item_target(),
                kind,
            },
            input: InputState::new(),
        };
    }

    /// Creates `name` in `dir` and expands `dir` so the result is visible.
    pub async fn create_item(&mut self, dir: &Entry, kind: NewItemKind, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        match actions::make(&self.provider, dir, kind, name).await {
            Ok(created) => {
                info!(dir = %dir.path.display(), count = created.len(), "created items");
                self.status_message = Some(format!("Created {} item(s)", created.len()));
            }
            Err(make_error) => {
                error!(%make_error, "failed to create item");
                self.status_message = Some(make_error.to_string());
            }
        }

        if dir.path != self.provider.root() {
            self.expanded.insert(NodeKey::of(dir));
        }
        self.refresh().await;
    }

    /// Opens the rename prompt for the selected node.
    pub async fn begin_rename(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let entry = row.entry.clone();

        let request = actions::prepare_rename(self.provider.file_system(), entry).await;
        let input = InputState::with_text(request.initial_value.clone());
        self.mode = AppMode::Prompt {
            purpose: PromptPurpose::Rename(request),
            input,
        };
    }

    pub async fn rename(&mut self, request: &RenameRequest, new_name: &str) {
        match actions::apply_rename(self.provider.file_system(), request, new_name).await {
            Ok(renamed) if renamed.is_empty() => {}
            Ok(renamed) => {
                self.status_message = Some(format!("Renamed {} item(s)", renamed.len()));
            }
            Err(rename_error) => {
                error!(%rename_error, "failed to rename");
                self.status_message = Some(rename_error.to_string());
            }
        }

        self.refresh().await;
    }

    /// Opens the delete confirmation for the selected node.
    pub async fn begin_delete(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let entry = row.entry.clone();

        let sibling = sibling::locate_sibling(self.provider.file_system(), &entry).await;
        self.mode = AppMode::ConfirmDelete {
            entry,
            sibling,
            selected_yes: false,
        };
    }

    pub async fn delete(&mut self, entry: &Entry) {
        match actions::delete(self.provider.file_system(), entry).await {
            Ok(deleted) => {
                self.close_views_under(&deleted);
                self.status_message = Some(format!("Deleted {} item(s)", deleted.len()));
            }
            Err(delete_error) => {
                error!(%delete_error, "failed to delete");
                self.status_message = Some(delete_error.to_string());
            }
        }

        self.refresh().await;
    }

    /// Applies watcher events: reloads or closes affected documents and
    /// refreshes the tree once.
    pub async fn handle_file_changes(&mut self, events: Vec<FileChangeEvent>) {
        if events.is_empty() {
            return;
        }
        debug!(count = events.len(), "workspace changed");

        let mut deleted = Vec::new();
        let mut changed = Vec::new();
        for event in events {
            match event.kind {
                FileChangeKind::Deleted => deleted.push(event.path),
                FileChangeKind::Changed | FileChangeKind::Created => changed.push(event.path),
            }
        }

        self.close_views_under(&deleted);
        self.reload_views(&changed).await;
        self.refresh().await;
    }

    fn close_views_under(&mut self, removed: &[PathBuf]) {
        let is_removed = |view: &DocumentView| {
            removed
                .iter()
                .any(|removed_path| view.path.starts_with(removed_path))
        };

        if self.primary_view.as_ref().is_some_and(is_removed) {
            self.primary_view = self.secondary_view.take();
        }
        if self.secondary_view.as_ref().is_some_and(is_removed) {
            self.secondary_view = None;
        }
        if self.primary_view.as_ref().is_some_and(is_removed) {
            self.primary_view = None;
        }
    }

    async fn reload_views(&mut self, changed: &[PathBuf]) {
        if let Some(view) = self.primary_view.take() {
            self.primary_view = Some(self.reloaded(view, changed).await);
        }
        if let Some(view) = self.secondary_view.take() {
            self.secondary_view = Some(self.reloaded(view, changed).await);
        }
    }

    /// Returns `view` with fresh contents when its path is in `changed`.
    async fn reloaded(&self, view: DocumentView, changed: &[PathBuf]) -> DocumentView {
        if !changed.contains(&view.path) {
            return view;
        }

        match self.load_document(&view.path).await {
            Ok(reloaded) => DocumentView {
                scroll_offset: view.scroll_offset,
                ..reloaded
            },
            Err(reload_error) => {
                debug!(%reload_error, "skipped document reload");

                view
            }
        }
    }

    /// Returns the index of the nearest preceding row one level up.
    fn parent_index(&self, index: usize) -> Option<usize> {
        let depth = self.rows.get(index)?.depth;
        if depth == 0 {
            return None;
        }

        self.rows[..index]
            .iter()
            .rposition(|row| row.depth < depth)
    }
}
