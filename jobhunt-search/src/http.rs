//! Shared HTTP client for search provider requests.

use crate::config::SearchConfig;
use crate::error::SearchError;
use std::time::Duration;

/// User-Agent sent when the configuration does not override it.
pub fn default_user_agent() -> String {
    format!("jobhunt/{}", env!("CARGO_PKG_VERSION"))
}

/// Build a [`reqwest::Client`] configured for search API requests.
///
/// The client has:
/// - Timeout from config
/// - Custom User-Agent if configured, `jobhunt/<version>` otherwise
/// - Gzip and Brotli decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => default_user_agent(),
    };

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_agent_names_the_crate_version() {
        let ua = default_user_agent();
        assert!(ua.starts_with("jobhunt/"));
        assert!(ua.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn build_client_with_default_config() {
        assert!(build_client(&SearchConfig::default()).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }
}
