//! Error types for docexport library.

use std::io;
use thiserror::Error;

/// Result type alias for docexport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while exporting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when creating directories or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested export format is neither docx nor pptx.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// A style option has the wrong type or an out-of-range value.
    #[error("Invalid style option: {0}")]
    InvalidStyle(String),

    /// Error while building document XML.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error writing the ZIP container.
    #[error("Package error: {0}")]
    Zip(String),

    /// The file on disk does not match the rendered byte count.
    #[error("Incomplete write: expected {expected} bytes, found {actual}")]
    IncompleteWrite {
        /// Bytes handed to the writer
        expected: u64,
        /// Bytes found on disk afterwards
        actual: u64,
    },

    /// The rendered artifact exceeds the configured size limit.
    #[error("Export of {size} bytes exceeds the {limit} byte limit")]
    TooLarge {
        /// Artifact size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// No generator is available for the configured provider.
    #[error("Unsupported generation provider: {0}")]
    UnsupportedProvider(String),

    /// The text generator failed.
    #[error("Generation error: {0}")]
    Generation(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Zip(err.to_string()),
        }
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("xlsx".to_string());
        assert_eq!(err.to_string(), "Unsupported export format: xlsx");

        let err = Error::IncompleteWrite {
            expected: 10,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "Incomplete write: expected 10 bytes, found 4"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_zip_io_error_unwraps() {
        let zip_err = zip::result::ZipError::Io(io::Error::new(io::ErrorKind::Other, "disk"));
        let err: Error = zip_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
