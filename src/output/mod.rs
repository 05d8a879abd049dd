//! Output formatting and writing functionality

pub mod formatters;
mod progress;
mod writers;

pub use self::formatters::format_size;
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::core::cycles::find_import_cycles;
use crate::error::Result;
use crate::models::config::{OutputFormat, Settings};
use crate::models::import_tree::ImportTree;
use ansi_term::Style;

/// Trait for different output formatters
pub trait Formatter {
    /// Format an import tree into a string
    fn format(&self, tree: &ImportTree) -> Result<String>;
}

/// Text formatter for the terminal tree view
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    pub use_colors: bool,
    pub show_stats: bool,
    pub show_imports: bool,
    pub show_external: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter showing the tree and the summary
    pub fn new(use_colors: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            show_stats: true,
            show_imports: false,
            show_external: false,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, tree: &ImportTree) -> Result<String> {
        let mut output = String::new();

        // Quiet mode prints the tree alone
        if !self.quiet {
            let header = "Python Dependency Analyzer";
            if self.use_colors {
                output.push_str(&Style::new().bold().paint(header).to_string());
            } else {
                output.push_str(header);
            }
            output.push('\n');
            output.push_str(&format!("Project root: {}\n", tree.project_root().display()));
            output.push_str(&format!("Depth: {} level(s)\n\n", tree.max_depth() + 1));
        }

        output.push_str(&formatters::format_tree_text(tree, self.use_colors));

        if self.show_imports {
            output.push('\n');
            output.push_str(&formatters::format_import_statements(tree));
        }

        if self.show_external {
            output.push('\n');
            output.push_str(&formatters::format_external_packages(tree));
        }

        if self.show_stats && !self.quiet {
            let cycles = find_import_cycles(tree);
            output.push('\n');
            output.push_str(&formatters::format_summary_text(tree, &cycles, self.use_colors));
        }

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, tree: &ImportTree) -> Result<String> {
        formatters::format_results_json(tree, self.pretty)
    }
}

/// CSV formatter for spreadsheet analysis
#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Create a new CSV formatter
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, tree: &ImportTree) -> Result<String> {
        formatters::format_results_csv(tree)
    }
}

/// Create a formatter for the configured output format
pub fn create_formatter(settings: &Settings) -> Box<dyn Formatter> {
    match settings.output_format {
        OutputFormat::Text => Box::new(TextFormatter {
            // Files never get escape codes
            use_colors: settings.use_colors && settings.output_file.is_none(),
            show_stats: settings.show_stats,
            show_imports: settings.show_imports,
            show_external: settings.show_external,
            quiet: settings.quiet,
        }),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
