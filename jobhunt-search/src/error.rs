//! Error types for the jobhunt-search crate.
//!
//! All errors use stable string messages suitable for display to users.
//! API keys never appear in error messages.

/// Errors that can occur while collecting or ranking search results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A raw search hit could not be normalised (bad or relative link).
    ///
    /// The pipeline drops such records and keeps going.
    #[error("malformed result: {0}")]
    MalformedResult(String),

    /// Invalid profile, scoring or search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Search provider credentials are missing or unusable.
    #[error("credentials error: {0}")]
    Credentials(String),

    /// An HTTP request to the search provider failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The search provider returned a body we could not decode.
    #[error("parse error: {0}")]
    Parse(String),

    /// Every configured site query failed.
    #[error("all search queries failed: {0}")]
    AllQueriesFailed(String),
}

/// Convenience type alias for jobhunt-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
