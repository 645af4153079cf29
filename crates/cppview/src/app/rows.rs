use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use crate::app::tree::CppTreeProvider;
use crate::domain::entry::{Entry, PairSide};
use crate::domain::row::TreeRow;
use crate::infra::error::FsError;

/// Identity of a tree node across refreshes.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NodeKey {
    pub path: PathBuf,
    pub title: Option<PairSide>,
}

impl NodeKey {
    pub fn of(entry: &Entry) -> Self {
        Self {
            path: entry.path.clone(),
            title: entry.title,
        }
    }
}

/// One flattened tree row in display order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct VisibleRow {
    pub entry: Entry,
    pub row: TreeRow,
    pub depth: usize,
    pub is_expanded: bool,
}

impl VisibleRow {
    pub fn key(&self) -> NodeKey {
        NodeKey::of(&self.entry)
    }
}

/// Walks the tree depth-first from the workspace root and flattens it.
///
/// `should_expand` decides, per collapsible node and depth, whether its
/// children are listed. A listing failure below the root is logged and the
/// node is shown without children.
///
/// # Errors
/// Returns an error when the workspace root cannot be listed.
pub async fn collect_rows<F>(
    provider: &CppTreeProvider,
    should_expand: F,
) -> Result<Vec<VisibleRow>, FsError>
where
    F: Fn(&Entry, usize) -> bool,
{
    let top_level = provider.children(None).await?;
    let mut pending: Vec<(Entry, usize)> =
        top_level.into_iter().rev().map(|entry| (entry, 0)).collect();

    let mut rows = Vec::new();
    while let Some((entry, depth)) = pending.pop() {
        let row = provider.tree_item(&entry).await;
        let is_expanded = row.is_collapsible() && should_expand(&entry, depth);

        if is_expanded {
            let children = match provider.children(Some(&entry)).await {
                Ok(children) => children,
                Err(error) => {
                    warn!(path = %entry.path.display(), %error, "failed to list children");

                    Vec::new()
                }
            };
            pending.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|child| (child, depth + 1)),
            );
        }

        rows.push(VisibleRow {
            entry,
            row,
            depth,
            is_expanded,
        });
    }

    Ok(rows)
}
