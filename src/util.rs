#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::glob;

use crate::constants::NOTEBOOK_EXT;

/// A glob utility function to find paths to files with certain extension
///
/// * `extension`: the file extension to find paths for
/// * `search_depth`: how many folders deep to search for
/// * `root_dir`: the root directory where search starts
pub fn find_files(extension: &str, search_depth: i8, root_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pattern = root_dir.to_path_buf();

    for _ in 0..search_depth {
        pattern.push("**");
    }

    pattern.push(format!("*.{extension}"));
    let pattern = pattern
        .to_str()
        .context("Could not convert root_dir to string")?
        .to_string();

    Ok(glob(&pattern)
        .context("Could not create glob")?
        .filter_map(Result::ok)
        .collect())
}

/// Resolves a CLI path argument to concrete notebook paths: a file is taken
/// as-is, a directory is searched for `*.ipynb` files two levels deep.
pub fn notebooks_in(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if path.is_dir() {
        let mut found = find_files(NOTEBOOK_EXT, 2, path)
            .with_context(|| format!("Could not search `{}` for notebooks", path.display()))?;
        found.sort();
        if found.is_empty() {
            bail!("No notebooks found under `{}`", path.display());
        }
        return Ok(found);
    }

    bail!("`{}` is neither a file nor a directory", path.display())
}
