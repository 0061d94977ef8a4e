//! Error types and handling infrastructure for launchman.
//!
//! Library code returns [`LaunchmanError`] through the crate-wide [`Result`] alias; the binary
//! wraps everything in `anyhow` at the edge. Most user-facing operations never surface these
//! errors directly: the controller turns them into notices or placeholder text.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for launchman operations.
#[derive(Error, Debug)]
pub enum LaunchmanError {
    /// File system related errors (read failures, removal failures, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A configured launch directory is missing
    #[error("Folder does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// The process may not read or modify the path
    #[error("No permission to access: {path}")]
    PermissionDenied { path: PathBuf },

    /// The external property-list converter failed or could not be launched
    #[error("Conversion failed: {message}")]
    ConversionFailed { message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments or out-of-range indices
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for launchman operations.
pub type Result<T> = std::result::Result<T, LaunchmanError>;

impl LaunchmanError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a ConversionFailed error with a descriptive message
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::ConversionFailed {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Map an io::Error raised while touching `path` onto the directory-level variants.
    pub fn from_io_at(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::DirectoryNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::file_error(format!("Failed to access {}", path.display()), err),
        }
    }
}

impl From<std::io::Error> for LaunchmanError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let path = PathBuf::from("/Library/LaunchAgents");

        let missing = LaunchmanError::DirectoryNotFound { path: path.clone() };
        assert_eq!(missing.to_string(), "Folder does not exist: /Library/LaunchAgents");

        let denied = LaunchmanError::PermissionDenied { path };
        assert_eq!(
            denied.to_string(),
            "No permission to access: /Library/LaunchAgents"
        );

        let conversion = LaunchmanError::conversion("plutil exited with status 1");
        assert_eq!(
            conversion.to_string(),
            "Conversion failed: plutil exited with status 1"
        );
    }

    #[test]
    fn test_from_io_at_classifies_kinds() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            LaunchmanError::from_io_at("/x", not_found),
            LaunchmanError::DirectoryNotFound { .. }
        ));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            LaunchmanError::from_io_at("/x", denied),
            LaunchmanError::PermissionDenied { .. }
        ));

        let other = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        match LaunchmanError::from_io_at("/x", other) {
            LaunchmanError::FileError { message, .. } => assert_eq!(message, "Failed to access /x"),
            e => panic!("Expected FileError, got {e:?}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LaunchmanError = io_err.into();

        match err {
            LaunchmanError::FileError { message, .. } => {
                assert_eq!(message, "Permission denied");
            }
            _ => panic!("Expected FileError variant"),
        }
    }
}
