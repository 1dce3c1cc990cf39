//! Best-effort recursive deletion.

use std::fs;
use std::io;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use thiserror::Error;

/// A path that could not be removed.
#[derive(Error, Debug)]
#[error("{}: {source}", .path.display())]
pub struct DeleteFailure {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Errors returned by [`delete_recursively`]
#[derive(Error, Debug)]
pub enum DeleteError {
    /// Some paths were left behind; every failure is listed.
    #[error("Failed to delete {} path(s): {}", .failures.len(), format_failures(.failures))]
    Incomplete { failures: Vec<DeleteFailure> },
}

impl DeleteError {
    #[must_use]
    pub fn failures(&self) -> &[DeleteFailure] {
        match self {
            Self::Incomplete { failures } => failures,
        }
    }
}

/// One `path: error` item per failure.
fn format_failures(failures: &[DeleteFailure]) -> String {
    failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Deletes a file, or a directory with everything below it.
///
/// Contents are removed before their directory. A failure on one entry does not stop
/// the others from being attempted. Symbolic links are removed, never followed.
/// A path that does not exist counts as deleted.
///
/// # Errors
/// Returns [`DeleteError::Incomplete`] listing each path that could not be removed
/// or visited.
pub fn delete_recursively(path: &Path) -> Result<(), DeleteError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(DeleteError::Incomplete {
                failures: vec![failure(path.to_path_buf(), source)],
            });
        }
    };

    let mut failures = Vec::new();
    if metadata.is_dir() {
        let entries = walk(path, &mut failures);
        // pre-order walk, reversed: children before their parent
        for (entry_path, is_dir) in entries.into_iter().rev() {
            if let Err(source) = remove_entry(&entry_path, is_dir) {
                failures.push(failure(entry_path, source));
            }
        }
    } else if let Err(source) = remove_entry(path, false) {
        failures.push(failure(path.to_path_buf(), source));
    }

    if failures.is_empty() { Ok(()) } else { Err(DeleteError::Incomplete { failures }) }
}

/// Deletes a file or directory tree, returning `true` if nothing was left behind.
#[must_use]
pub fn delete(path: &Path) -> bool {
    delete_recursively(path).is_ok()
}

/// Lists `root` and everything below it, parents first.
fn walk(root: &Path, failures: &mut Vec<DeleteFailure>) -> Vec<(PathBuf, bool)> {
    let mut entries = Vec::new();
    for result in WalkBuilder::new(root).standard_filters(false).follow_links(false).build() {
        match result {
            Ok(entry) => {
                let is_dir = entry.file_type().is_some_and(|file_type| file_type.is_dir());
                entries.push((entry.into_path(), is_dir));
            }
            Err(err) => {
                let path = error_path(&err).unwrap_or(root).to_path_buf();
                let source = err.into_io_error().unwrap_or_else(|| io::Error::other("walk failed"));
                failures.push(failure(path, source));
            }
        }
    }
    entries
}

/// Path attached to a walker error, if any.
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

/// Removes one entry. An entry that is already gone counts as removed.
fn remove_entry(path: &Path, is_dir: bool) -> io::Result<()> {
    let result = if is_dir { fs::remove_dir(path) } else { fs::remove_file(path) };
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Logs and records a failed removal.
fn failure(path: PathBuf, source: io::Error) -> DeleteFailure {
    tracing::warn!(path = %path.display(), error = %source, "Failed to delete");
    DeleteFailure { path, source }
}
