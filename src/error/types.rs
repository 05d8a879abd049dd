//! Error types and definitions for pydeptree
//!
//! Only input and configuration errors ever abort a run. Unreadable files and
//! linter failures are absorbed where they happen and surface as zeroed
//! fields in the rendered tree.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - the invocation fails with exit code 1
    Error,
    /// Critical level - configuration is unusable, exit code 2
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for pydeptree operations
#[derive(Debug, Error)]
pub enum PyDepTreeError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Entry file does not exist or cannot be accessed
    #[error("Invalid entry file: {path}")]
    InvalidEntry { path: PathBuf },

    /// Entry file is not a Python source file
    #[error("{path} must be a Python file (.py)")]
    NotPythonFile { path: PathBuf },

    /// No entry file given on the command line or in configuration
    #[error("No entry file specified")]
    NoEntry,

    /// Invalid path errors (project root, output directory)
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// TOML parsing errors without file context
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Analysis errors with a free-form message
    #[error("Analysis error: {message}")]
    Analysis { message: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV buffer was not valid UTF-8
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Worker pool could not be created
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },
}

impl PyDepTreeError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PyDepTreeError::PermissionDenied { .. } => ErrorSeverity::Warning,

            PyDepTreeError::Config { .. } => ErrorSeverity::Critical,
            PyDepTreeError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            PyDepTreeError::ConfigRead { .. } => ErrorSeverity::Critical,
            PyDepTreeError::ConfigParse { .. } => ErrorSeverity::Critical,
            PyDepTreeError::GlobPattern { .. } => ErrorSeverity::Critical,
            PyDepTreeError::StdoutWrite { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            PyDepTreeError::InvalidEntry { path } => {
                format!("Entry file '{}' does not exist or cannot be read.", path.display())
            }
            PyDepTreeError::NotPythonFile { path } => {
                format!("'{}' must be a Python file (.py).", path.display())
            }
            PyDepTreeError::NoEntry => {
                "No entry file given. Pass a Python file, e.g. `pydeptree main.py`.".to_string()
            }
            PyDepTreeError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide an existing directory.", path.display())
            }
            PyDepTreeError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            PyDepTreeError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create one with --init or drop the --config option.", path.display())
            }
            PyDepTreeError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            _ => self.to_string(),
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        PyDepTreeError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        PyDepTreeError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        PyDepTreeError::PermissionDenied { path: path.into() }
    }

    /// Create an analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        PyDepTreeError::Analysis {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for PyDepTreeError {
    fn from(err: std::io::Error) -> Self {
        PyDepTreeError::io_error(err)
    }
}

impl From<toml::de::Error> for PyDepTreeError {
    fn from(err: toml::de::Error) -> Self {
        PyDepTreeError::TomlParse { source: err }
    }
}

impl From<csv::Error> for PyDepTreeError {
    fn from(err: csv::Error) -> Self {
        PyDepTreeError::Csv { source: err }
    }
}

impl From<glob::PatternError> for PyDepTreeError {
    fn from(err: glob::PatternError) -> Self {
        PyDepTreeError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for PyDepTreeError {
    fn from(err: serde_json::Error) -> Self {
        PyDepTreeError::JsonSerialize { source: err }
    }
}

/// Result type alias for pydeptree operations
pub type Result<T> = std::result::Result<T, PyDepTreeError>;
