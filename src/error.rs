//! Error types for Deckhand
//!
//! Uses `thiserror` for library errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Deckhand operations
pub type DeckhandResult<T> = Result<T, DeckhandError>;

/// Main error type for Deckhand operations
#[derive(Error, Debug)]
pub enum DeckhandError {
    /// A remote command exited non-zero and was not tolerated
    #[error("command failed with exit status {code}: {command}")]
    CommandFailed { command: String, code: i32 },

    /// The ssh/scp process could not be spawned or the session dropped
    #[error("connection error: {message}")]
    Connection { message: String },

    /// Upload of a file to the target host failed
    #[error("upload to '{path}' failed: {message}")]
    UploadFailed { path: String, message: String },

    /// Download of a file from the target host failed
    #[error("download of '{path}' failed: {message}")]
    DownloadFailed { path: String, message: String },

    /// A required textual marker was not found in a remote config file
    #[error("marker not found: {marker}")]
    MarkerNotFound { marker: String },

    /// The sudoers template has no placeholder to substitute
    #[error("sudoers template is missing the '{placeholder}' placeholder")]
    MissingPlaceholder { placeholder: String },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_command_failed() {
        let err = DeckhandError::CommandFailed {
            command: "apt update --yes".to_string(),
            code: 100,
        };
        assert_eq!(
            err.to_string(),
            "command failed with exit status 100: apt update --yes"
        );
    }

    #[test]
    fn test_error_display_marker_not_found() {
        let err = DeckhandError::MarkerNotFound {
            marker: "<!-- Define an AJP 1.3 Connector on port 8009 -->".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "marker not found: <!-- Define an AJP 1.3 Connector on port 8009 -->"
        );
    }
}
