//! Error context utilities for pydeptree
//!
//! Helpers for turning foreign errors and missing values into
//! [`PyDepTreeError`]s.

use std::path::Path;
use crate::error::{PyDepTreeError, Result};

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add file context to an error
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| {
            let err: &(dyn std::error::Error + 'static) = &err;
            if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
                match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        return PyDepTreeError::permission_denied(path.as_ref());
                    }
                    std::io::ErrorKind::NotFound => {
                        return PyDepTreeError::InvalidEntry {
                            path: path.as_ref().to_path_buf(),
                        };
                    }
                    _ => {}
                }
            }

            PyDepTreeError::Analysis {
                message: format!("{}: {}", path.as_ref().display(), err),
            }
        })
    }
}

/// Extension trait for Option to convert to Result with a custom error
pub trait OptionExt<T> {
    /// Convert Option to Result with a custom error
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> PyDepTreeError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> PyDepTreeError,
    {
        self.ok_or_else(err_fn)
    }
}
