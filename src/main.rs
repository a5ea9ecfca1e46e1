#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # nbmarks
//!
//! Command-line front end for the mark injector: annotates every gradable
//! cell of an nbgrader notebook with its point value, backing the original
//! up first, and can report point totals without rewriting anything.

use std::path::PathBuf;

use anyhow::Result;
use bpaf::*;
use colored::Colorize;
use nbmarks::{
    marks::{self, MarkSummary},
    util::notebooks_in,
};
use tabled::{
    Table,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Inject mark annotations into notebooks
    Inject(Vec<String>),
    /// Report a notebook's point total without rewriting it
    Total(String),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses notebook or directory paths
    fn p() -> impl Parser<Vec<String>> {
        positional("PATH")
            .help("Notebook file or directory of notebooks")
            .some("at least one notebook path is required")
    }

    /// parses a single notebook path
    fn n() -> impl Parser<String> {
        positional("NOTEBOOK").help("Notebook file")
    }

    let inject = construct!(Cmd::Inject(p()))
        .to_options()
        .command("inject")
        .help("Insert how many points each nbgrader assessed cell is worth");

    let total = construct!(Cmd::Total(n()))
        .to_options()
        .command("total")
        .help("Report the assignment point total without modifying the notebook");

    let cmd = construct!([inject, total]);

    cmd.to_options().descr("Utilities for nbgrader notebooks").run()
}

/// Renders a per-cell summary table for one notebook.
fn show_summary(path: &PathBuf, summary: &MarkSummary) {
    eprintln!(
        "{}",
        Table::new(&summary.rows)
            .with(Panel::header(path.display().to_string()))
            .with(Panel::footer(format!("total assignment points = {}", summary.total)))
            .with(
                Modify::new(Rows::first())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(
                Modify::new(Rows::last())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(Style::modern())
    );
}

fn main() -> Result<()> {
    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let cmd = options();

    match cmd {
        Cmd::Inject(paths) => {
            for arg in paths {
                for notebook in notebooks_in(&PathBuf::from(&arg))? {
                    match marks::inject_marks(&notebook) {
                        Ok(report) => {
                            show_summary(&notebook, &report.summary);
                            eprintln!(
                                "{}",
                                format!("original saved as {}", report.backup.display()).green()
                            );
                        }
                        Err(e) => eprintln!("{}", format!("{e:#}").red()),
                    }
                }
            }
        }
        Cmd::Total(path) => {
            let path = PathBuf::from(path);
            let notebook = nbmarks::notebook::Notebook::load(&path)?;
            let summary = marks::survey(&notebook)?;
            show_summary(&path, &summary);
        }
    };

    Ok(())
}
