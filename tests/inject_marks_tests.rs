//! Tests for notebook mark injection.

use std::{path::PathBuf, time::SystemTime};

use nbmarks::{
    marks::{backup_path, inject_marks, survey},
    notebook::Notebook,
};

fn temp_notebook(contents: &str) -> (PathBuf, PathBuf) {
    let nonce = SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("nbmarks_inject_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");

    let path = dir.join("assignment.ipynb");
    std::fs::write(&path, contents).expect("write notebook");
    (dir, path)
}

fn sample_notebook() -> String {
    serde_json::json!({
        "cells": [
            {
                "cell_type": "markdown",
                "source": ["# Assignment 1\n", "\n", "Answer all questions.\n"],
                "metadata": {}
            },
            {
                "cell_type": "code",
                "source": ["def mean(data):\n", "    ...\n"],
                "metadata": {"nbgrader": {"grade": true, "points": 1}},
                "outputs": [],
                "execution_count": null
            },
            {
                "cell_type": "code",
                "source": ["assert mean([1, 2, 3]) == 2\n"],
                "metadata": {"nbgrader": {"grade": true, "points": 2.5}},
                "outputs": [],
                "execution_count": null
            }
        ],
        "metadata": {"kernelspec": {"name": "python3"}},
        "nbformat": 4,
        "nbformat_minor": 5
    })
    .to_string()
}

#[test]
fn totals_sum_only_cells_with_points() {
    let (dir, path) = temp_notebook(&sample_notebook());

    let report = inject_marks(&path).expect("inject");
    assert_eq!(report.summary.total, 3.5);
    assert_eq!(report.summary.rows.len(), 2);
    assert_eq!(report.summary.rows[0].points, 1.0);
    assert_eq!(report.summary.rows[1].points, 2.5);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn marker_appears_exactly_once_per_annotated_cell() {
    let (dir, path) = temp_notebook(&sample_notebook());

    inject_marks(&path).expect("inject");
    let notebook = Notebook::load(&path).expect("reload");

    for (i, cell) in notebook.cells.iter().enumerate() {
        let markers = cell
            .source
            .iter()
            .filter(|l| l.contains("This part worth"))
            .count();
        if i == 0 {
            assert_eq!(markers, 0, "unmarked cell must stay unmarked");
        } else {
            assert_eq!(markers, 1, "cell {i} should carry exactly one marker");
            assert!(cell.source[0].contains("This part worth"));
        }
    }

    assert_eq!(notebook.cells[1].source[0], "# This part worth 1\n\n");
    assert_eq!(notebook.cells[2].source[0], "# This part worth 2.5\n\n");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn backup_is_byte_identical_and_never_overwritten() {
    let original = sample_notebook();
    let (dir, path) = temp_notebook(&original);

    let first = inject_marks(&path).expect("first inject");
    assert_eq!(first.backup, dir.join("assignment.ipynb.bak"));
    let backed_up = std::fs::read_to_string(&first.backup).expect("read backup");
    assert_eq!(backed_up, original, "backup must preserve original bytes");

    let second = inject_marks(&path).expect("second inject");
    assert_eq!(second.backup, dir.join("assignment.ipynb.bak.1"));
    let untouched = std::fs::read_to_string(&first.backup).expect("re-read first backup");
    assert_eq!(untouched, original, "existing backup must never be overwritten");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn backup_path_skips_taken_generations() {
    let (dir, path) = temp_notebook(&sample_notebook());
    std::fs::write(dir.join("assignment.ipynb.bak"), "taken").expect("occupy .bak");
    std::fs::write(dir.join("assignment.ipynb.bak.1"), "taken").expect("occupy .bak.1");

    assert_eq!(backup_path(&path), dir.join("assignment.ipynb.bak.2"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn injection_is_idempotent() {
    let (dir, path) = temp_notebook(&sample_notebook());

    inject_marks(&path).expect("first inject");
    let once = std::fs::read_to_string(&path).expect("read first output");

    inject_marks(&path).expect("second inject");
    let twice = std::fs::read_to_string(&path).expect("read second output");
    assert_eq!(once, twice, "re-injection must be byte-identical");

    // and from a clean restore of the original
    std::fs::remove_file(&path).expect("drop annotated copy");
    std::fs::copy(dir.join("assignment.ipynb.bak"), &path).expect("restore original");
    inject_marks(&path).expect("third inject");
    let restored = std::fs::read_to_string(&path).expect("read third output");
    assert_eq!(once, restored);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn stale_annotations_are_stripped_not_duplicated() {
    let stale = serde_json::json!({
        "cells": [
            {
                "cell_type": "code",
                "source": ["# This part worth 99\n\n", "x = 1\n"],
                "metadata": {"nbgrader": {"points": 4}}
            }
        ],
        "nbformat": 4,
        "nbformat_minor": 5
    })
    .to_string();
    let (dir, path) = temp_notebook(&stale);

    inject_marks(&path).expect("inject");
    let notebook = Notebook::load(&path).expect("reload");
    assert_eq!(notebook.cells[0].source[0], "# This part worth 4\n\n");
    assert_eq!(notebook.cells[0].source[1], "x = 1\n");
    assert_eq!(notebook.cells[0].source.len(), 2);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn non_numeric_points_abort_before_any_write() {
    let bad = serde_json::json!({
        "cells": [
            {
                "cell_type": "code",
                "source": ["x = 1\n"],
                "metadata": {"nbgrader": {"points": "a lot"}}
            }
        ],
        "nbformat": 4,
        "nbformat_minor": 5
    })
    .to_string();
    let (dir, path) = temp_notebook(&bad);

    assert!(inject_marks(&path).is_err());
    let on_disk = std::fs::read_to_string(&path).expect("read file");
    assert_eq!(on_disk, bad, "a failed run must not touch the file");
    assert!(!dir.join("assignment.ipynb.bak").exists(), "no backup on failure");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn malformed_notebook_is_a_fatal_parse_error() {
    let (dir, path) = temp_notebook("{ not json");

    assert!(inject_marks(&path).is_err());
    assert_eq!(std::fs::read_to_string(&path).expect("read file"), "{ not json");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn string_points_are_coerced() {
    let text = serde_json::json!({
        "cells": [
            {
                "cell_type": "markdown",
                "source": ["Describe your approach.\n"],
                "metadata": {"nbgrader": {"points": "2"}}
            }
        ],
        "nbformat": 4,
        "nbformat_minor": 5
    })
    .to_string();
    let (dir, path) = temp_notebook(&text);

    let report = inject_marks(&path).expect("inject");
    assert_eq!(report.summary.total, 2.0);

    let notebook = Notebook::load(&path).expect("reload");
    assert_eq!(notebook.cells[0].source[0], "`This part worth 2`\n\n");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn survey_reports_without_rewriting() {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("notebooks")
        .join("assignment.ipynb");
    let before = std::fs::read_to_string(&fixture).expect("read fixture");

    let notebook = Notebook::load(&fixture).expect("load fixture");
    let summary = survey(&notebook).expect("survey");
    assert_eq!(summary.total, 6.0);
    assert_eq!(summary.rows.len(), 3);

    let after = std::fs::read_to_string(&fixture).expect("re-read fixture");
    assert_eq!(before, after);
}
