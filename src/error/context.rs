//! Error context utilities
//!
//! Helpers for attaching context to foreign errors.

use crate::error::{AuditError, Result};
use std::path::Path;

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;

    /// Map an IO-flavoured error on `path` to the matching variant
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| AuditError::Analysis {
            message: format!("{}: {}", context(), err),
        })
    }

    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| {
            let any: &(dyn std::error::Error + 'static) = &err;
            if let Some(io_err) = any.downcast_ref::<std::io::Error>() {
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    return AuditError::permission_denied(path.as_ref());
                }
            }

            AuditError::templates_dir_unreadable(path.as_ref(), err.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_with_context() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));

        match result.with_context(|| "Failed to read whitelist") {
            Err(AuditError::Analysis { message }) => {
                assert!(message.contains("Failed to read whitelist"));
                assert!(message.contains("file not found"));
            }
            other => panic!("Expected Analysis error, got {:?}", other),
        }
    }

    #[test]
    fn test_with_file_context() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));

        match result.with_file_context("templates") {
            Err(AuditError::TemplatesDirUnreadable { path, .. }) => {
                assert_eq!(path.to_string_lossy(), "templates");
            }
            other => panic!("Expected TemplatesDirUnreadable error, got {:?}", other),
        }
    }

    #[test]
    fn test_with_file_context_permission_denied() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));

        match result.with_file_context("templates") {
            Err(err @ AuditError::PermissionDenied { .. }) => {
                assert!(err.to_string().contains("templates"));
                assert_eq!(err.exit_code(), 2);
            }
            other => panic!("Expected PermissionDenied error, got {:?}", other),
        }
    }
}
