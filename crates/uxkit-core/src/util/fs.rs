//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uxkit_types::{Result, ToolkitError};
use walkdir::WalkDir;

/// Expand path with tilde.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    path.to_path_buf()
}

/// Read entire file as string (slurp).
pub fn slurp(path: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(path).map_err(Into::into)
}

/// Whether a path is relative and carries no root marker.
pub fn is_relative(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    !path.as_os_str().is_empty() && path.is_relative() && !path.has_root()
}

/// Fail with a validation error unless `path` is relative.
///
/// `what` names the path in the message, e.g. `The source path`.
pub fn ensure_relative(path: impl AsRef<Path>, what: &str) -> Result<()> {
    let path = path.as_ref();
    if !is_relative(path) {
        return Err(ToolkitError::Validation(format!(
            "{} \"{}\" must be relative.",
            what,
            path.display()
        )));
    }
    Ok(())
}

/// Copy `source` to `destination`, creating parent directories and
/// overwriting an existing destination.
pub fn copy_file(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::copy(source, destination).map_err(|e| {
        ToolkitError::Io(std::io::Error::new(
            e.kind(),
            format!(
                "Failed to copy \"{}\" to \"{}\": {}",
                source.display(),
                destination.display(),
                e
            ),
        ))
    })?;

    Ok(())
}

/// List every file under `dir` recursively, as paths relative to `dir`,
/// sorted by their string form.
pub fn list_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ToolkitError::NotFound(format!(
            "The directory \"{}\" does not exist.",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.map_err(|e| ToolkitError::Other(format!("Failed to walk \"{}\": {}", dir.display(), e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| ToolkitError::Other(e.to_string()))?
            .to_path_buf();
        files.push(relative);
    }

    files.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    Ok(files)
}

/// Create a fresh temporary directory, removed when the guard is dropped.
pub fn scratch_dir(prefix: &str) -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .map_err(Into::into)
}
