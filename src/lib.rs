//! pydeptree - A Python import dependency tree analyzer
//!
//! This library follows the imports of Python entry files through a project,
//! builds a depth-bounded import tree with per-file metrics, and renders it
//! as a colored tree, JSON or CSV.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{build_graph, classify, find_import_cycles, GraphBuilder, GraphBuilderConfig};
pub use crate::core::lint::{LintSource, NoLint, RuffLinter};
pub use error::{ErrorSeverity, OptionExt, PyDepTreeError, Result, ResultExt};
pub use models::{
    config::Settings, Child, FileMetrics, FileNode, FileRole, ImportTree, LintCounts, NodeId,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
