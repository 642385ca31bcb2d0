//! Per-site search fan-out.
//!
//! Issues one provider query per configured site concurrently, logs and
//! skips failed sites, and concatenates the hits in site order so the
//! downstream ranking sees a deterministic input sequence.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::SearchProvider;
use crate::query::site_queries;
use crate::types::RawResult;

/// Collect raw hits for `text` from every configured site.
///
/// # Errors
///
/// Returns [`SearchError::AllQueriesFailed`] only if **every** site query
/// fails. Partial failures are logged but do not prevent results from the
/// successful sites being returned.
pub async fn collect_results<P: SearchProvider>(
    provider: &P,
    text: &str,
    config: &SearchConfig,
) -> Result<Vec<RawResult>, SearchError> {
    let queries = site_queries(text, config);

    let futures: Vec<_> = queries
        .iter()
        .map(|query| async move { (query, provider.search(query).await) })
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    let mut all_results: Vec<RawResult> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for (query, outcome) in outcomes {
        let site = query.site.as_deref().unwrap_or("<any>");
        match outcome {
            Ok(results) => {
                tracing::debug!(
                    provider = provider.name(),
                    site,
                    count = results.len(),
                    "site query returned results"
                );
                all_results.extend(results);
            }
            Err(err) => {
                tracing::warn!(provider = provider.name(), site, error = %err, "site query failed");
                errors.push(format!("{site}: {err}"));
            }
        }
    }

    if errors.len() == queries.len() {
        return Err(SearchError::AllQueriesFailed(errors.join("; ")));
    }

    Ok(all_results)
}
