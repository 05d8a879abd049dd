//! Tests for error severity and user-facing messages

use super::*;
use std::io;
use std::path::PathBuf;

#[test]
fn test_error_severity() {
    assert_eq!(
        PyDepTreeError::permission_denied("locked.py").severity(),
        ErrorSeverity::Warning
    );

    assert_eq!(
        PyDepTreeError::io_error(io::Error::new(io::ErrorKind::NotFound, "not found")).severity(),
        ErrorSeverity::Error
    );

    assert_eq!(
        PyDepTreeError::NotPythonFile {
            path: PathBuf::from("notes.txt"),
        }
        .severity(),
        ErrorSeverity::Error
    );

    assert_eq!(
        PyDepTreeError::config_error("Invalid config").severity(),
        ErrorSeverity::Critical
    );
}

#[test]
fn test_is_critical() {
    assert!(PyDepTreeError::config_error("Invalid config").is_critical());
    assert!(!PyDepTreeError::InvalidEntry {
        path: PathBuf::from("main.py"),
    }
    .is_critical());
}

#[test]
fn test_user_message() {
    let msg = PyDepTreeError::NotPythonFile {
        path: PathBuf::from("/project/test.txt"),
    }
    .user_message();
    assert!(msg.contains("/project/test.txt"));
    assert!(msg.contains("must be a Python file"));

    let msg = PyDepTreeError::InvalidEntry {
        path: PathBuf::from("/project/missing.py"),
    }
    .user_message();
    assert!(msg.contains("does not exist"));

    let msg = PyDepTreeError::permission_denied("/project/secret.py").user_message();
    assert!(msg.contains("permission denied"));

    // Variants without a custom message fall back to Display
    let err = PyDepTreeError::analysis_error("boom");
    assert_eq!(err.user_message(), err.to_string());
}

#[test]
fn test_severity_display() {
    assert_eq!(ErrorSeverity::Warning.to_string(), "WARNING");
    assert_eq!(ErrorSeverity::Error.to_string(), "ERROR");
    assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
}

#[test]
fn test_from_conversions() {
    let err: PyDepTreeError = io::Error::new(io::ErrorKind::Other, "x").into();
    assert!(matches!(err, PyDepTreeError::Io { .. }));

    let err: PyDepTreeError = glob::Pattern::new("[").unwrap_err().into();
    assert!(matches!(err, PyDepTreeError::GlobPattern { .. }));
    assert!(err.is_critical());
}
