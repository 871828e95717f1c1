//! # uxkit Installer
//!
//! Turns a recipe into files on disk:
//! - [`PoolResolver`] walks the recipe's dependency graph into a [`Pool`]
//! - [`Installer`] copies the pool's files and reports the packages to add

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod installer;
pub mod pool;
pub mod resolver;

pub use installer::{InstallationReport, Installer};
pub use pool::{Pool, PoolFiles};
pub use resolver::PoolResolver;
