//! Raw result canonicalisation.

use crate::error::Result;
use crate::profile::collapse_whitespace;
use crate::types::{NormalizedResult, RawResult};

use super::url_normalize::identity_key;

/// Canonicalise one raw search hit.
///
/// Derives the identity key from the link, collapses whitespace in title
/// and snippet, and builds the lowercased `search_text` the scorer matches
/// against.
///
/// # Errors
///
/// Returns [`crate::SearchError::MalformedResult`] if the link is not an
/// absolute URL with a host.
pub fn normalize(raw: RawResult) -> Result<NormalizedResult> {
    let identity_key = identity_key(&raw.link)?;
    let title = collapse_whitespace(&raw.title);
    let snippet = collapse_whitespace(&raw.snippet);
    let search_text = collapse_whitespace(&format!(
        "{} {}",
        title.to_lowercase(),
        snippet.to_lowercase()
    ));

    Ok(NormalizedResult {
        identity_key,
        title,
        link: raw.link.trim().to_string(),
        snippet,
        search_text,
        sources: raw.source.into_iter().collect(),
    })
}
