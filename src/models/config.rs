//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration settings for pydeptree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Python entry files to analyze
    pub entries: Vec<PathBuf>,

    /// Project root; defaults to the first entry's directory
    pub project_root: Option<PathBuf>,

    /// Number of import levels to show below each entry (at least 1)
    pub depth: usize,

    /// Glob patterns for local modules that should not be expanded
    pub exclude_patterns: Vec<String>,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to run the lint collaborator on every visited file
    pub check_lint: bool,

    /// Timeout for one lint invocation, in seconds
    pub lint_timeout_secs: u64,

    /// Whether to print the per-role statistics table
    pub show_stats: bool,

    /// Whether to list each file's import statements
    pub show_imports: bool,

    /// Whether to list external packages referenced by the project
    pub show_external: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to analyze files of one level in parallel
    pub parallel: bool,

    /// Worker threads for parallel analysis (defaults to the CPU count)
    pub threads: Option<usize>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show debug information
    pub verbose: bool,

    /// Whether to show a progress spinner
    pub show_progress: bool,
}

impl Settings {
    /// Expansion bound handed to the graph builder
    ///
    /// `depth` counts displayed import levels; the builder counts extra hops
    /// below the roots' direct children.
    pub fn max_depth(&self) -> usize {
        self.depth.saturating_sub(1)
    }

    /// Worker thread count, falling back to the number of CPUs
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            project_root: None,
            depth: 2,
            exclude_patterns: vec![
                "**/venv/**".to_string(),
                "**/.venv/**".to_string(),
                "**/site-packages/**".to_string(),
            ],
            output_format: OutputFormat::Text,
            output_file: None,
            check_lint: true,
            lint_timeout_secs: 5,
            show_stats: true,
            show_imports: false,
            show_external: false,
            use_colors: true,
            parallel: true,
            threads: None,
            quiet: false,
            verbose: false,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored tree for the terminal
    Text,
    /// JSON document for programmatic consumption
    Json,
    /// One CSV row per file
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub entries: Option<Vec<PathBuf>>,
    pub project_root: Option<PathBuf>,
    pub depth: Option<usize>,
    pub exclude_patterns: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub check_lint: Option<bool>,
    pub lint_timeout_secs: Option<u64>,
    pub show_stats: Option<bool>,
    pub show_imports: Option<bool>,
    pub show_external: Option<bool>,
    pub use_colors: Option<bool>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.entries.is_some() {
            self.entries = other.entries;
        }
        if other.project_root.is_some() {
            self.project_root = other.project_root;
        }
        if other.depth.is_some() {
            self.depth = other.depth;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.check_lint.is_some() {
            self.check_lint = other.check_lint;
        }
        if other.lint_timeout_secs.is_some() {
            self.lint_timeout_secs = other.lint_timeout_secs;
        }
        if other.show_stats.is_some() {
            self.show_stats = other.show_stats;
        }
        if other.show_imports.is_some() {
            self.show_imports = other.show_imports;
        }
        if other.show_external.is_some() {
            self.show_external = other.show_external;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.threads.is_some() {
            self.threads = other.threads;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(entries) = &self.entries {
            settings.entries = entries.clone();
        }
        if let Some(project_root) = &self.project_root {
            settings.project_root = Some(project_root.clone());
        }
        if let Some(depth) = self.depth {
            settings.depth = depth;
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(check_lint) = self.check_lint {
            settings.check_lint = check_lint;
        }
        if let Some(lint_timeout_secs) = self.lint_timeout_secs {
            settings.lint_timeout_secs = lint_timeout_secs;
        }
        if let Some(show_stats) = self.show_stats {
            settings.show_stats = show_stats;
        }
        if let Some(show_imports) = self.show_imports {
            settings.show_imports = show_imports;
        }
        if let Some(show_external) = self.show_external {
            settings.show_external = show_external;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(threads) = self.threads {
            settings.threads = Some(threads);
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
