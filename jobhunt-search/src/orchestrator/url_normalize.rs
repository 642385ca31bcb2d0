//! URL canonicalisation for duplicate detection.
//!
//! Two links that point at the same posting but differ in tracking
//! parameters, trailing slash, fragment, host capitalisation or an explicit
//! default port produce the same identity key.

use url::Url;

use crate::error::{Result, SearchError};

/// Tracking query parameters stripped in addition to every `utm_*` key.
const TRACKING_PARAMS: &[&str] = &[
    "gclid", "fbclid", "msclkid", "dclid", "yclid", "mc_cid", "mc_eid", "_ga", "_gl", "igshid",
    "ref_src",
];

/// Derive the identity key of a result link.
///
/// Applies the following transformations:
///
/// 1. Lowercase scheme and host (path and query keep their case).
/// 2. Remove default ports (`:80` for HTTP, `:443` for HTTPS).
/// 3. Remove the fragment.
/// 4. Strip tracking parameters; the remaining parameters keep their
///    original order and encoding.
/// 5. Remove a trailing slash from the path (unless the path is exactly `"/"`).
///
/// # Errors
///
/// Returns [`SearchError::MalformedResult`] if `link` is not an absolute
/// `http` or `https` URL with a host.
///
/// # Examples
///
/// ```
/// use jobhunt_search::orchestrator::url_normalize::identity_key;
///
/// let a = identity_key("https://Example.COM/jobs/42/").unwrap();
/// let b = identity_key("https://example.com/jobs/42?utm_source=x").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn identity_key(link: &str) -> Result<String> {
    let mut parsed = Url::parse(link.trim())
        .map_err(|e| SearchError::MalformedResult(format!("{link}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SearchError::MalformedResult(format!(
            "{link}: unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(SearchError::MalformedResult(format!("{link}: URL has no host")));
    }

    parsed.set_fragment(None);

    if is_default_port(&parsed) {
        let _ = parsed.set_port(None);
    }

    let kept_query = parsed.query().map(|query| {
        query
            .split('&')
            .filter(|pair| !pair.is_empty() && !is_tracking_pair(pair))
            .collect::<Vec<_>>()
            .join("&")
    });
    match kept_query.as_deref() {
        Some(q) if !q.is_empty() => parsed.set_query(Some(q)),
        _ => parsed.set_query(None),
    }

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(path.trim_end_matches('/'));
    }

    // Url::parse already lowercases scheme and host, so the serialised
    // form is canonical.
    Ok(parsed.to_string())
}

/// Returns `true` if the raw `key=value` pair names a tracking parameter.
fn is_tracking_pair(pair: &str) -> bool {
    let key = pair.split_once('=').map_or(pair, |(k, _)| k).to_lowercase();
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key.as_str())
}

/// Returns `true` if the URL uses the default port for its scheme.
fn is_default_port(url: &Url) -> bool {
    matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    )
}
