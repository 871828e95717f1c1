//! # uxkit Core
//!
//! Configuration management, logging and filesystem helpers shared by the
//! uxkit crates.
//!
//! This crate provides:
//!
//! - **Configuration**: file-based settings with environment overrides
//! - **Logging**: `tracing` subscriber setup
//! - **File Operations**: relative-path checks, copies, directory walking
//!
//! ## Example
//!
//! ```no_run
//! use uxkit_core::{config::ToolkitConfig, log};
//!
//! let config = ToolkitConfig::load()?;
//! log::init(config.log_level)?;
//!
//! let kits_dir = config.kits_dir();
//! # Ok::<(), uxkit_types::ToolkitError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod log;
pub mod util;

// Re-export commonly used items
pub use config::{GithubSettings, ToolkitConfig};
pub use uxkit_types::{Result, ToolkitError};
