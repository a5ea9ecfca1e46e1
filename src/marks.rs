#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Injects point-value annotations into nbgrader assignment notebooks.
//!
//! Every gradable cell (one whose metadata carries `nbgrader.points`) gets a
//! first line stating what the cell is worth, so students can see the mark
//! distribution inline. Stale annotations from earlier runs are stripped
//! before inserting, which makes injection idempotent. The original file is
//! preserved under a numbered `.bak` name before the rewrite.
//!
//! The rename-then-write pair is not transactional: a crash between the two
//! leaves the content alive under the backup name and nothing at the original
//! path. Acceptable for an offline, human-supervised batch tool.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tabled::Tabled;
use tracing::info;

use crate::{
    constants::{BACKUP_EXT, MARK_COMMENT},
    notebook::{Cell, CellType, Notebook, StructuralError},
};

/// One annotated cell, for the per-notebook summary table.
#[derive(Tabled, Debug, Clone, PartialEq)]
pub struct MarkRow {
    /// Zero-based position of the cell within the notebook.
    #[tabled(rename = "Cell")]
    pub index:  usize,
    /// Whether the cell is code or markdown.
    #[tabled(rename = "Type")]
    pub kind:   CellType,
    /// The point value annotated into the cell.
    #[tabled(rename = "Points")]
    pub points: f64,
}

/// The outcome of annotating one notebook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkSummary {
    /// Every cell that received an annotation, in document order.
    pub rows:  Vec<MarkRow>,
    /// Sum of point values across annotated cells.
    pub total: f64,
}

/// A [`MarkSummary`] plus where the pre-rewrite backup landed.
#[derive(Debug, Clone)]
pub struct InjectReport {
    /// Per-cell annotation summary.
    pub summary: MarkSummary,
    /// Path the original content was preserved under.
    pub backup:  PathBuf,
}

/// Removes every line containing the mark comment, then removes blank lines
/// left at the start. Pure function over the source lines.
pub fn remove_previous(source: &[String]) -> Vec<String> {
    let mut result: Vec<String> = source
        .iter()
        .filter(|line| !line.contains(MARK_COMMENT))
        .cloned()
        .collect();

    let leading_blank = result.iter().take_while(|line| line.trim().is_empty()).count();
    result.drain(..leading_blank);
    result
}

/// Rewrites a cell's source so its first line announces the point value.
///
/// Code (and raw) cells get a comment-style line, markdown cells an
/// inline-code one; both are followed by a blank line to keep the annotation
/// visually separate from the cell body.
pub fn insert_total(cell: &mut Cell, points: f64) {
    cell.source = remove_previous(&cell.source);

    // f64's Display drops the trailing `.0` on whole values, so a cell worth
    // 3 points reads `This part worth 3`, not `3.0`.
    let rendered = format!("{points}");
    let line = match cell.cell_type {
        CellType::Markdown => format!("`{MARK_COMMENT} {rendered}`\n\n"),
        CellType::Code | CellType::Raw => format!("# {MARK_COMMENT} {rendered}\n\n"),
    };
    cell.source.insert(0, line);
}

/// Annotates every gradable cell in place and returns the per-cell summary.
///
/// Cells without the `nbgrader.points` metadata path are left untouched;
/// absence of the key, not a zero value, is the skip condition.
pub fn annotate(notebook: &mut Notebook) -> Result<MarkSummary, StructuralError> {
    let mut summary = MarkSummary::default();

    for (index, cell) in notebook.cells.iter_mut().enumerate() {
        let Some(points) = cell.points(index)? else {
            continue;
        };

        summary.total += points;
        summary.rows.push(MarkRow {
            index,
            kind: cell.cell_type,
            points,
        });
        insert_total(cell, points);
    }

    Ok(summary)
}

/// Computes the summary a run of [`annotate`] would produce, without mutating
/// anything.
pub fn survey(notebook: &Notebook) -> Result<MarkSummary, StructuralError> {
    let mut summary = MarkSummary::default();

    for (index, cell) in notebook.cells.iter().enumerate() {
        if let Some(points) = cell.points(index)? {
            summary.total += points;
            summary.rows.push(MarkRow {
                index,
                kind: cell.cell_type,
                points,
            });
        }
    }

    Ok(summary)
}

/// Finds the first unused backup name for `path`: `<path>.bak`, then
/// `<path>.bak.1`, `<path>.bak.2`, ... probed sequentially. An existing
/// backup is never a candidate, so no backup is ever overwritten.
pub fn backup_path(path: &Path) -> PathBuf {
    let base = format!("{}.{BACKUP_EXT}", path.display());

    let mut candidate = PathBuf::from(&base);
    let mut generation = 1u32;
    while candidate.exists() {
        candidate = PathBuf::from(format!("{base}.{generation}"));
        generation += 1;
    }
    candidate
}

/// Loads the notebook at `path`, annotates every gradable cell, renames the
/// original to a fresh backup name, and writes the annotated document back to
/// `path` as pretty JSON.
///
/// No partial writes occur before the parse succeeds; a
/// [`StructuralError`] leaves the file exactly as it was.
pub fn inject_marks(path: &Path) -> anyhow::Result<InjectReport> {
    let mut notebook = Notebook::load(path)?;
    let summary = annotate(&mut notebook)?;
    let output = notebook.dump()?;

    let backup = backup_path(path);
    std::fs::rename(path, &backup)
        .with_context(|| format!("Could not back up `{}` to `{}`", path.display(), backup.display()))?;
    std::fs::write(path, output)
        .with_context(|| format!("Could not write annotated notebook to `{}`", path.display()))?;

    info!(
        path = %path.display(),
        backup = %backup.display(),
        total = summary.total,
        "injected mark annotations"
    );

    Ok(InjectReport { summary, backup })
}
