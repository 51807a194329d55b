//! Error types and handling for OpenVPN status parsing

use thiserror::Error;

/// Main error type for status parsing
#[derive(Error, Debug)]
pub enum StatusError {
    /// The status source could not be opened
    #[error("Unable to open status file: {0}")]
    Open(#[source] std::io::Error),

    /// The status source failed while it was being read
    #[error("Unable to read status file: {0}")]
    Read(#[source] std::io::Error),

    /// The status source contained no lines at all
    #[error("Status File is empty")]
    Empty,

    /// A line matched none of the patterns expected in the current section
    #[error("Unable to Parse Status file: line {line}: {content:?}")]
    Malformed {
        /// 1-based line number
        line: usize,
        content: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`StatusError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source could not be opened or read
    SourceUnavailable,
    /// Source opened but held zero lines
    EmptySource,
    /// A line did not fit the status layout
    UnparseableLine,
    /// Configuration could not be loaded
    Config,
}

impl StatusError {
    /// Discriminator for callers that only care about the failure class
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatusError::Open(_) | StatusError::Read(_) => ErrorKind::SourceUnavailable,
            StatusError::Empty => ErrorKind::EmptySource,
            StatusError::Malformed { .. } => ErrorKind::UnparseableLine,
            StatusError::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for status operations
pub type Result<T> = std::result::Result<T, StatusError>;

impl From<toml::de::Error> for StatusError {
    fn from(err: toml::de::Error) -> Self {
        StatusError::Config(format!("TOML parsing error: {err}"))
    }
}

impl From<toml::ser::Error> for StatusError {
    fn from(err: toml::ser::Error) -> Self {
        StatusError::Config(format!("TOML serialization error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(StatusError::Empty.to_string(), "Status File is empty");

        let err = StatusError::Malformed {
            line: 3,
            content: "garbage".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to Parse Status file: line 3: \"garbage\""
        );
    }

    #[test]
    fn test_error_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        assert_eq!(StatusError::Open(io_err).kind(), ErrorKind::SourceUnavailable);
        assert_eq!(StatusError::Empty.kind(), ErrorKind::EmptySource);
        assert_eq!(
            StatusError::Config("bad".to_string()).kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: StatusError = toml_err.into();
        assert!(matches!(err, StatusError::Config(_)));
        assert!(err.to_string().contains("TOML parsing error"));
    }
}
