//! Settings validation

use std::path::Path;

use crate::error::{PyDepTreeError, Result};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    ///
    /// Entry files themselves are validated by the graph builder, which
    /// distinguishes missing files from non-Python ones.
    pub fn validate(settings: &Settings) -> Result<()> {
        if let Some(root) = &settings.project_root {
            if !root.is_dir() {
                return Err(PyDepTreeError::InvalidPath { path: root.clone() });
            }
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern)?;
        }

        if settings.depth == 0 {
            return Err(PyDepTreeError::Config {
                message: "Depth must be at least 1".to_string(),
            });
        }

        if settings.lint_timeout_secs == 0 {
            return Err(PyDepTreeError::Config {
                message: "Lint timeout must be at least 1 second".to_string(),
            });
        }

        if settings.threads == Some(0) {
            return Err(PyDepTreeError::Config {
                message: "Thread count must be at least 1".to_string(),
            });
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that an output path is writable
    fn validate_output_path(path: &Path) -> Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        if !parent.exists() {
            return Err(PyDepTreeError::InvalidPath {
                path: parent.to_path_buf(),
            });
        }

        let metadata = std::fs::metadata(parent).map_err(PyDepTreeError::io_error)?;
        if metadata.permissions().readonly() {
            return Err(PyDepTreeError::PermissionDenied {
                path: parent.to_path_buf(),
            });
        }

        Ok(())
    }
}
