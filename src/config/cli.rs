//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments that feed into settings
///
/// Tri-state toggles are `Option<bool>` so that an absent flag leaves the
/// value from lower-precedence sources alone.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub entries: Vec<PathBuf>,
    pub root: Option<PathBuf>,
    pub depth: Option<usize>,
    pub exclude: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub check_lint: Option<bool>,
    pub lint_timeout: Option<u64>,
    pub show_stats: Option<bool>,
    pub show_code: bool,
    pub show_external: bool,
    pub no_colors: bool,
    pub no_parallel: bool,
    pub threads: Option<usize>,
    pub no_progress: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Collect settings-relevant fields from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        let toggle = |on: bool, off: bool| match (on, off) {
            (_, true) => Some(false),
            (true, false) => Some(true),
            (false, false) => None,
        };

        Self {
            entries: args.entries.clone(),
            root: args.root.clone(),
            depth: args.depth.map(|d| d as usize),
            exclude: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            output_format: args.output.map(|format| match format {
                CliOutputFormat::Text => OutputFormat::Text,
                CliOutputFormat::Json => OutputFormat::Json,
                CliOutputFormat::Csv => OutputFormat::Csv,
            }),
            output_file: args.output_file.clone(),
            check_lint: toggle(args.check_lint, args.no_check_lint),
            lint_timeout: args.lint_timeout,
            show_stats: toggle(args.show_stats, args.no_show_stats),
            show_code: args.show_code,
            show_external: args.show_external,
            no_colors: args.no_colors,
            no_parallel: args.no_parallel,
            threads: args.threads,
            no_progress: args.no_progress,
            quiet: args.quiet,
            verbose: args.verbose,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from_args(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if !self.args.entries.is_empty() {
            settings.entries = Some(self.args.entries.clone());
        }

        settings.project_root = self.args.root.clone();
        settings.depth = self.args.depth;
        settings.exclude_patterns = self.args.exclude.clone();
        settings.output_format = self.args.output_format;
        settings.output_file = self.args.output_file.clone();
        settings.check_lint = self.args.check_lint;
        settings.lint_timeout_secs = self.args.lint_timeout;
        settings.show_stats = self.args.show_stats;
        settings.threads = self.args.threads;

        // Plain flags only ever switch a default on or off
        if self.args.show_code {
            settings.show_imports = Some(true);
        }
        if self.args.show_external {
            settings.show_external = Some(true);
        }
        if self.args.no_colors {
            settings.use_colors = Some(false);
        }
        if self.args.no_parallel {
            settings.parallel = Some(false);
        }
        if self.args.no_progress {
            settings.show_progress = Some(false);
        }
        if self.args.quiet {
            settings.quiet = Some(true);
        }
        if self.args.verbose {
            settings.verbose = Some(true);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
