//! Data models and structures for pydeptree

pub mod config;
pub mod import_tree;
pub mod metrics;
pub mod role;

pub use config::{OutputFormat, PartialSettings, Settings};
pub use import_tree::{Child, FileNode, ImportTree, NodeId};
pub use metrics::{FileMetrics, LintCounts};
pub use role::FileRole;
