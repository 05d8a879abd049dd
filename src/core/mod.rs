//! Core analysis: classification, metrics, linting and tree building

pub mod classifier;
pub mod cycles;
pub mod graph_builder;
pub mod lint;
pub mod metrics;
pub mod parallel;

pub use classifier::classify;
pub use cycles::find_import_cycles;
pub use graph_builder::{build_graph, validate_entry, GraphBuilder, GraphBuilderConfig};
pub use lint::{LintSource, NoLint, RuffLinter};
pub use metrics::{collect, FileAnalysis};
