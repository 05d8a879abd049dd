//! Per-file metrics collection

use super::lint::LintSource;
use crate::models::FileMetrics;
use crate::parsers::import_extractor::{extract_imports, ExtractedImports};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything learned from reading one file once
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub metrics: FileMetrics,
    /// False when the file could not be read or is not UTF-8
    pub readable: bool,
    pub imports: ExtractedImports,
}

impl FileAnalysis {
    /// Analysis of a file that could not be read
    pub fn unreadable(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            metrics: FileMetrics::default(),
            readable: false,
            imports: ExtractedImports::default(),
        }
    }
}

/// Read a file, extract its imports and measure it
///
/// The lint source is only consulted for readable files.
pub fn collect(path: &Path, lint: &dyn LintSource) -> FileAnalysis {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("cannot read {}: {}", path.display(), e);
            return FileAnalysis::unreadable(path);
        }
    };

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => {
            tracing::debug!("{} is not valid UTF-8", path.display());
            return FileAnalysis::unreadable(path);
        }
    };

    let imports = extract_imports(&text);
    let lint_counts = lint.lint_counts(path);

    FileAnalysis {
        path: path.to_path_buf(),
        metrics: FileMetrics {
            size_bytes: text.len() as u64,
            lines: text.lines().count(),
            imports: imports.statement_count,
            lint_errors: lint_counts.errors,
            lint_warnings: lint_counts.warnings,
        },
        readable: true,
        imports,
    }
}
