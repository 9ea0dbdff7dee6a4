//! Command-line interface module.

mod args;

pub use args::Cli;

use crate::debug;
use crate::utils::path::normalize_path;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// `--cd`: change to the source's directory and return the source path
/// relative to it.
pub fn enter_source_dir(source: &Path) -> Result<PathBuf> {
    let (dir, name) = split_source(source);
    std::env::set_current_dir(&dir)
        .with_context(|| format!("cannot change directory to {}", dir.display()))?;
    debug!("cli"; "working directory: {}", dir.display());
    Ok(name)
}

/// Absolute parent directory and file name of `source`.
fn split_source(source: &Path) -> (PathBuf, PathBuf) {
    let absolute = normalize_path(source);
    match (absolute.parent(), absolute.file_name()) {
        (Some(dir), Some(name)) => (dir.to_path_buf(), PathBuf::from(name)),
        _ => (absolute.clone(), absolute),
    }
}
