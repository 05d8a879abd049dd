//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// pydeptree - Python Dependency Analyzer
#[derive(Parser, Debug)]
#[command(name = "pydeptree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Python Dependency Analyzer: analyze Python file dependencies as an import tree")]
#[command(long_about = "pydeptree follows the imports of one or more Python entry files through a project \
and renders them as a depth-limited tree. Each file is classified by role (main, config, model, service, \
utils, test) and annotated with its size, line count, import count and lint issues reported by ruff.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Show the imports of main.py, two levels deep
    pydeptree main.py

    # Follow imports further
    pydeptree main.py --depth 4

    # Analyze several entry points at once
    pydeptree app.py worker.py

    # Resolve modules against a different project root
    pydeptree src/app/main.py --root src

Output Options:
    # List the import statements of every file
    pydeptree main.py --show-code

    # List third-party and standard-library packages
    pydeptree main.py --show-external

    # JSON or CSV for scripting
    pydeptree main.py --output json --output-file deps.json
    pydeptree main.py --output csv > deps.csv

Linting:
    # Skip ruff entirely
    pydeptree main.py --no-check-lint

Configuration:
    # Use a specific configuration file
    pydeptree main.py --config ./pydeptree.toml

    # Create a default configuration file
    pydeptree --init
")]
pub struct Args {
    /// Python entry files
    #[arg(value_name = "ENTRY", help = "Python files to analyze (each becomes a root of the tree)")]
    pub entries: Vec<PathBuf>,

    /// Number of import levels to show
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..), help = "Number of import levels to show below each entry [default: 2]")]
    pub depth: Option<u64>,

    /// Project root for module resolution
    #[arg(short, long, value_name = "DIR", help = "Project root used to resolve local modules (defaults to the directory of the first entry)")]
    pub root: Option<PathBuf>,

    /// Exclude local modules matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for local modules to leave out (can be specified multiple times)")]
    pub exclude: Vec<String>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Output format: 'text' for a colored tree, 'json' or 'csv' for machine processing [default: text]")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Run ruff on every file
    #[arg(long, overrides_with = "no_check_lint", help = "Check files with ruff and show error/warning counts (default)")]
    pub check_lint: bool,

    /// Do not run ruff
    #[arg(long, help = "Do not run ruff")]
    pub no_check_lint: bool,

    /// Timeout for one ruff invocation
    #[arg(long, value_name = "SECS", help = "Seconds to wait for ruff on a single file [default: 5]")]
    pub lint_timeout: Option<u64>,

    /// Show the statistics table
    #[arg(long, overrides_with = "no_show_stats", help = "Show the file statistics summary (default)")]
    pub show_stats: bool,

    /// Hide the statistics table
    #[arg(long, help = "Hide the file statistics summary")]
    pub no_show_stats: bool,

    /// Show import statements
    #[arg(long, help = "List the import statements of each file")]
    pub show_code: bool,

    /// Show external packages
    #[arg(long, help = "List external packages imported by the analyzed files")]
    pub show_external: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful for piping output)")]
    pub no_colors: bool,

    /// Disable parallel processing
    #[arg(long, help = "Analyze files one at a time")]
    pub no_parallel: bool,

    /// Worker thread count
    #[arg(long, value_name = "N", help = "Number of worker threads (defaults to the number of CPUs)")]
    pub threads: Option<usize>,

    /// Disable the progress spinner
    #[arg(long, help = "Disable the progress spinner (useful for CI environments)")]
    pub no_progress: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose", help = "Suppress non-essential output (only the tree is printed)")]
    pub quiet: bool,

    /// Show debug information
    #[arg(short, long, help = "Show debug logging on stderr")]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .pydeptree.toml in the current directory)")]
    pub config: Option<PathBuf>,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.pydeptree.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored tree for the terminal
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
