//! Command implementations.

pub mod debug_kit;
pub mod install;
pub mod list;
