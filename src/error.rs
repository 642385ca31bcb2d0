//! Error types for the jobhunt application.

use jobhunt_search::SearchError;

/// Top-level error type for loading config, searching and writing digests.
#[derive(Debug, thiserror::Error)]
pub enum HunterError {
    /// Configuration file missing, unreadable or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Search or ranking error.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Offline result file could not be decoded.
    #[error("input error: {0}")]
    Input(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, HunterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_errors_display_unchanged() {
        let err: HunterError = SearchError::Config("limit must be >= 0".into()).into();
        assert_eq!(err.to_string(), "config error: limit must be >= 0");
    }

    #[test]
    fn io_error_converts() {
        let err: HunterError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
