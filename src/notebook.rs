#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The on-disk notebook document model.
//!
//! Notebooks are loaded wholesale into memory, mutated, and written back
//! wholesale. Keys this tool does not care about (`nbformat`, outputs,
//! execution counts, ...) are carried through untouched via flattened maps so
//! a rewrite never loses information.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{NBGRADER_KEY, POINTS_KEY};

/// A malformed input document. Always fatal; raised before any mutation
/// reaches disk.
#[derive(thiserror::Error, Debug)]
pub enum StructuralError {
    /// The file could not be read at all.
    #[error("Could not read notebook at `{path}`: {source}")]
    Unreadable {
        /// The path that failed to open.
        path:   String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The file contents were not valid notebook JSON.
    #[error("Could not parse notebook at `{path}`: {source}")]
    Unparseable {
        /// The path that failed to parse.
        path:   String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
    /// A cell carried an nbgrader `points` value that is not numeric.
    #[error("Cell {cell} has a non-numeric nbgrader points value: {value}")]
    BadPoints {
        /// Zero-based index of the offending cell.
        cell:  usize,
        /// The value found, rendered as JSON.
        value: String,
    },
    /// The rewritten document could not be serialized.
    #[error("Could not serialize notebook: {0}")]
    Unserializable(#[from] serde_json::Error),
}

/// The kind of a notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// An executable code cell.
    Code,
    /// A markdown prose cell.
    Markdown,
    /// A raw cell, passed through by notebook converters.
    Raw,
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            CellType::Code => "code",
            CellType::Markdown => "markdown",
            CellType::Raw => "raw",
        };
        write!(f, "{tag}")
    }
}

/// One unit within a notebook, either code or prose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Whether this is a code, markdown, or raw cell.
    pub cell_type: CellType,
    /// Ordered source lines; each line keeps its trailing newline, following
    /// the nbformat convention.
    #[serde(default)]
    pub source:    Vec<String>,
    /// Cell metadata, optionally containing `nbgrader.points`.
    #[serde(default)]
    pub metadata:  Map<String, Value>,
    /// Any other keys the cell carried (outputs, execution_count, id, ...).
    #[serde(flatten)]
    pub extra:     Map<String, Value>,
}

impl Cell {
    /// Returns the cell's nbgrader point value, if the metadata path
    /// `nbgrader.points` is present.
    ///
    /// Absence of the key is the skip signal, not an error. A value that is
    /// present but fails numeric coercion is a [`StructuralError::BadPoints`];
    /// silently embedding an unvalidated value in an annotation is worse than
    /// aborting.
    pub fn points(&self, index: usize) -> Result<Option<f64>, StructuralError> {
        let Some(points) = self
            .metadata
            .get(NBGRADER_KEY)
            .and_then(Value::as_object)
            .and_then(|nbgrader| nbgrader.get(POINTS_KEY))
        else {
            return Ok(None);
        };

        let parsed = match points {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(value) => Ok(Some(value)),
            None => Err(StructuralError::BadPoints {
                cell:  index,
                value: points.to_string(),
            }),
        }
    }
}

/// An ordered sequence of cells plus whatever top-level keys the file
/// carried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    /// The cells, in document order.
    pub cells: Vec<Cell>,
    /// Top-level keys other than `cells` (`metadata`, `nbformat`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notebook {
    /// Loads a notebook from disk, failing before any mutation if the file is
    /// unreadable or not valid notebook JSON.
    pub fn load(path: &Path) -> Result<Self, StructuralError> {
        let text =
            std::fs::read_to_string(path).map_err(|source| StructuralError::Unreadable {
                path: path.display().to_string(),
                source,
            })?;

        let notebook: Notebook =
            serde_json::from_str(&text).map_err(|source| StructuralError::Unparseable {
                path: path.display().to_string(),
                source,
            })?;

        debug!(cells = notebook.cells.len(), path = %path.display(), "loaded notebook");
        Ok(notebook)
    }

    /// Serializes the notebook as human-diffable JSON with stable two-space
    /// indentation, preserving the original key order.
    pub fn dump(&self) -> Result<String, StructuralError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
