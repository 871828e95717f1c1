//! A file copied by a recipe.

use std::fmt;
use std::path::{Path, PathBuf};
use uxkit_core::util::ensure_relative;
use uxkit_types::Result;

/// A file to copy, relative to its recipe on one side and to the
/// installation root on the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    /// Path relative to the recipe directory
    pub source: PathBuf,
    /// Path relative to the installation destination
    pub destination: PathBuf,
}

impl File {
    /// Create a file, rejecting absolute paths on either side.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let destination = destination.into();

        ensure_relative(&source, "The source path")?;
        ensure_relative(&destination, "The destination path")?;

        Ok(Self { source, destination })
    }

    /// Source path, relative to the recipe.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Destination path, relative to the installation root.
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source.display())
    }
}
