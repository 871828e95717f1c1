//! Common utility functions.

pub mod fs;

// Re-export commonly used items
pub use fs::{copy_file, ensure_relative, expand_path, is_relative, list_files, scratch_dir, slurp};
