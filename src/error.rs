use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the voice-collect library.
///
/// `MalformedFilename` and `Decode` are per-file problems: the collector logs
/// them, skips the file and keeps going. Everything else aborts the run.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Source directory is missing or is not a directory.
    #[error("Source directory not found: '{path}'")]
    DirectoryNotFound {
        /// Path that was expected to be a directory
        path: PathBuf,
    },

    /// Destination file could not be written.
    #[error("Failed to write output file '{path}': {message}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// File name carries no usable ordering key.
    #[error("Malformed file name '{name}': no numeric ordering key found")]
    MalformedFilename {
        /// Offending file name
        name: String,
    },

    /// File content is not valid UTF-8 text.
    #[error("Failed to decode '{path}' as UTF-8 text: {message}")]
    Decode {
        /// Path to the file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },
}

impl Error {
    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a write error with path context.
    #[must_use]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed file name error.
    #[must_use]
    pub fn malformed_filename(name: impl Into<String>) -> Self {
        Self::MalformedFilename { name: name.into() }
    }

    /// Creates a directory not found error.
    #[must_use]
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true for per-file errors that skip the file instead of aborting.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedFilename { .. } | Self::Decode { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config("test message");
        assert!(err.is_config());
        assert!(err.to_string().contains("test message"));
    }

    #[test]
    fn test_write_error_mentions_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::write("/tmp/out.md", io_err);
        assert!(err.to_string().contains("/tmp/out.md"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(Error::malformed_filename("notes.txt").is_recoverable());
        assert!(Error::decode("a.txt", "invalid utf-8").is_recoverable());
        assert!(!Error::directory_not_found("/missing").is_recoverable());
        assert!(!Error::config("bad").is_recoverable());
    }

    #[test]
    fn test_directory_not_found_message() {
        let err = Error::directory_not_found("/no/such/dir");
        assert!(err.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::malformed_filename("x.txt");
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
