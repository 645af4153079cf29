//! Non-interactive tree output for `--print`.

use std::io::{self, Write};
use std::iter::Peekable;
use std::path::Path;
use std::slice;

use serde::Serialize;
use thiserror::Error;

use crate::app::rows::{VisibleRow, collect_rows};
use crate::app::tree::CppTreeProvider;
use crate::config::PrintFormat;
use crate::domain::entry::{EntryKind, PairSide};
use crate::domain::row::{RowCommand, RowContext};
use crate::infra::error::FsError;

const INDENT: &str = "  ";

#[derive(Debug, Error)]
pub enum PrintError {
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// One node of the JSON output.
#[derive(Debug, Serialize)]
struct PrintedNode<'a> {
    label: String,
    path: &'a Path,
    kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<PairSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<RowContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a RowCommand>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<PrintedNode<'a>>,
}

/// Writes the grouped tree, expanded `depth` levels below the root.
///
/// # Errors
/// Returns an error when the root cannot be listed or `writer` fails.
pub async fn print_tree<W: Write>(
    provider: &CppTreeProvider,
    depth: usize,
    format: PrintFormat,
    writer: &mut W,
) -> Result<(), PrintError> {
    let rows = collect_rows(provider, |_, row_depth| row_depth < depth).await?;

    match format {
        PrintFormat::Text => write_text(&rows, writer)?,
        PrintFormat::Json => {
            let nodes = nest(&mut rows.iter().peekable(), 0);
            serde_json::to_writer_pretty(&mut *writer, &nodes)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}

/// Writes one indented line per row. Directories end in `/`; groups list the
/// files they open.
fn write_text<W: Write>(rows: &[VisibleRow], writer: &mut W) -> io::Result<()> {
    for row in rows {
        let indent = INDENT.repeat(row.depth);
        let label = row.row.label.display_text();

        match (&row.row.context, &row.row.command) {
            (Some(RowContext::Group), Some(command)) => {
                writeln!(writer, "{indent}{label} ({})", opened_files(command))?;
            }
            _ if row.entry.is_dir() => writeln!(writer, "{indent}{label}/")?,
            _ => writeln!(writer, "{indent}{label}")?,
        }
    }

    Ok(())
}

fn opened_files(command: &RowCommand) -> String {
    let file_name = |path: &Path| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    match command {
        RowCommand::OpenFile(path) => file_name(path),
        RowCommand::OpenFilesSplit(primary, secondary) => {
            format!("{} + {}", file_name(primary), file_name(secondary))
        }
    }
}

/// Rebuilds the nested tree from depth-first rows.
fn nest<'a>(
    rows: &mut Peekable<slice::Iter<'a, VisibleRow>>,
    depth: usize,
) -> Vec<PrintedNode<'a>> {
    let mut nodes = Vec::new();
    while let Some(row) = rows.next_if(|row| row.depth == depth) {
        let children = nest(rows, depth + 1);
        nodes.push(PrintedNode {
            label: row.row.label.display_text(),
            path: &row.entry.path,
            kind: row.entry.kind,
            title: row.entry.title,
            context: row.row.context,
            command: row.row.command.as_ref(),
            children,
        });
    }

    nodes
}
