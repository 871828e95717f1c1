//! Terminal interaction helpers.

pub mod progress;
pub mod prompt;
