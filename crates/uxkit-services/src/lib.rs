//! # uxkit Services
//!
//! External service client implementations for uxkit.
//!
//! This crate provides async clients for:
//! - **GitHub**: repository archive downloads for remote kits

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod github;

pub use github::{ArchiveFetcher, GithubClient, GithubConfig};
