//! Per-file metrics attached to every node of the import tree

use serde::{Deserialize, Serialize};

/// Lint issue counts reported for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintCounts {
    pub errors: usize,
    pub warnings: usize,
}

impl LintCounts {
    /// Create lint counts
    pub fn new(errors: usize, warnings: usize) -> Self {
        Self { errors, warnings }
    }

    /// Total number of issues
    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }
}

/// Size, line, import and lint figures for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    /// File size in bytes
    pub size_bytes: u64,
    /// Number of lines (an unterminated final line counts)
    pub lines: usize,
    /// Number of import statements, one per statement line
    pub imports: usize,
    /// Lint errors
    pub lint_errors: usize,
    /// Lint warnings
    pub lint_warnings: usize,
}

impl FileMetrics {
    /// Lint counts as a pair
    pub fn lint(&self) -> LintCounts {
        LintCounts::new(self.lint_errors, self.lint_warnings)
    }

    /// Whether any lint issue was reported
    pub fn has_lint_issues(&self) -> bool {
        self.lint_errors > 0 || self.lint_warnings > 0
    }
}
