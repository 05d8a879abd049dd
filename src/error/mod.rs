//! Error handling for pydeptree
//!
//! This module provides the error type, result alias, severity levels and
//! context utilities shared by the library and the command-line front end.

pub mod context;
#[cfg(test)]
mod tests;
pub mod types;

pub use context::{OptionExt, ResultExt};
pub use types::{ErrorSeverity, PyDepTreeError, Result};
