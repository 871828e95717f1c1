//! # uxkit Types
//!
//! Core types and enums shared across all uxkit crates.
//!
//! This crate provides the fundamental building blocks for the uxkit recipe
//! installer, including:
//!
//! - Validated names for kits, PHP packages, npm packages and components
//! - Version preferences compared with semantic-version precedence
//! - Common enums for recipe types, registry types and log levels
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use uxkit_types::{KitName, VersionPreference};
//!
//! let kit = KitName::new("Shadcn UI").unwrap();
//! assert_eq!(kit.as_str(), "Shadcn UI");
//!
//! // Leading hyphens are rejected
//! assert!(KitName::new("-my-kit").is_err());
//!
//! let newer = VersionPreference::new("^3.12.0").unwrap();
//! let older = VersionPreference::new("^3.11.0").unwrap();
//! assert!(newer.is_higher_than(&older));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod identifiers;
pub mod enums;

// Re-export common types for convenience
pub use errors::{ToolkitError, Result};
pub use identifiers::{ComponentName, KitName, NpmPackageName, PhpPackageName, VersionPreference};
pub use enums::{LogLevel, RecipeType, RegistryType};
