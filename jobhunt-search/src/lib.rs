//! # jobhunt-search
//!
//! Ranking and deduplication engine for job-search digests.
//!
//! Takes raw web-search hits (title, link, snippet), canonicalises their
//! links, collapses duplicates, scores each posting against a
//! [`KeywordProfile`] and returns an ordered [`Digest`].
//!
//! ## Design
//!
//! - The ranking pipeline is a synchronous pure transform with no shared state
//! - Search providers sit behind the [`SearchProvider`] trait; the bundled one
//!   calls the Google Custom Search JSON API
//! - Site queries fan out concurrently; a failing site is logged and skipped
//! - Credentials are passed in explicitly and never reach the ranking code
//!
//! ## Security
//!
//! - API keys never appear in error messages or `Debug` output
//! - Search queries are logged only at trace level

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod profile;
pub mod provider;
pub mod providers;
pub mod query;
pub mod types;

pub use config::{RequiredGate, ScoringWeights, SearchConfig};
pub use error::{Result, SearchError};
pub use orchestrator::filter::DomainFilter;
pub use orchestrator::pipeline::{build_digest, RankingOptions};
pub use profile::KeywordProfile;
pub use provider::SearchProvider;
pub use providers::{CseCredentials, GoogleCseProvider};
pub use query::SiteQuery;
pub use types::{Digest, DigestStats, NormalizedResult, RawResult, ScoreOutcome, ScoredEntry};

/// Rank an already-collected batch of raw results.
///
/// Validates `options`, then runs the pipeline.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the scoring options are invalid.
/// Malformed records inside `raw` never cause an error.
///
/// # Examples
///
/// ```
/// use jobhunt_search::{rank_results, KeywordProfile, RankingOptions, RawResult};
///
/// let profile = KeywordProfile::new(vec!["esg"], vec![], vec![], vec![]).unwrap();
/// let raw = vec![RawResult::new("ESG Lead", "https://jobs.example.com/1", "")];
/// let digest = rank_results(raw, &RankingOptions::new(profile)).unwrap();
/// assert_eq!(digest.entries.len(), 1);
/// ```
pub fn rank_results(raw: Vec<RawResult>, options: &RankingOptions) -> Result<Digest> {
    options.validate()?;
    Ok(build_digest(raw, options))
}

/// Search every configured site and rank the combined hits.
///
/// Both configurations are validated before any request is sent.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for invalid configuration and
/// [`SearchError::AllQueriesFailed`] if every site query fails.
pub async fn search_jobs<P: SearchProvider>(
    provider: &P,
    query: &str,
    search_config: &SearchConfig,
    options: &RankingOptions,
) -> Result<Digest> {
    search_config.validate()?;
    options.validate()?;
    let raw = orchestrator::search::collect_results(provider, query, search_config).await?;
    Ok(build_digest(raw, options))
}
