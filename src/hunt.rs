//! Application flows shared by the CLI: live search and offline ranking.

use std::path::Path;

use jobhunt_search::{
    rank_results, search_jobs, Digest, GoogleCseProvider, RawResult, SearchProvider,
};

use crate::config::HunterConfig;
use crate::error::{HunterError, Result};

/// Query every configured site through Google Custom Search and rank the hits.
///
/// `limit` overrides `digest.limit` from the config when given. Returns the
/// query text that was sent alongside the digest.
///
/// # Errors
///
/// Fails fast on invalid configuration or missing credentials, and when
/// every site query fails.
pub async fn run_search(
    config: &HunterConfig,
    query: Option<&str>,
    limit: Option<usize>,
) -> Result<(String, Digest)> {
    config.validate()?;
    let provider = GoogleCseProvider::new(config.credentials()?, &config.search)?;
    search_with(&provider, config, query, limit).await
}

/// Same as [`run_search`] with a caller-supplied provider.
pub async fn search_with<P: SearchProvider>(
    provider: &P,
    config: &HunterConfig,
    query: Option<&str>,
    limit: Option<usize>,
) -> Result<(String, Digest)> {
    let mut options = config.ranking_options()?;
    if limit.is_some() {
        options.limit = limit;
    }
    let text = config.query_text(query)?;

    tracing::info!(
        provider = provider.name(),
        sites = config.search.active_sites().count(),
        "searching"
    );
    let digest = search_jobs(provider, &text, &config.search, &options).await?;
    tracing::info!(
        entries = digest.entries.len(),
        received = digest.stats.received,
        "digest ready"
    );
    Ok((text, digest))
}

/// Rank a JSON array of raw results without touching the network.
///
/// # Errors
///
/// Returns [`HunterError::Input`] if the file is not a JSON array of
/// results, or a config error if the profile is invalid.
pub fn rank_file(config: &HunterConfig, input: &Path, limit: Option<usize>) -> Result<Digest> {
    let mut options = config.ranking_options()?;
    if limit.is_some() {
        options.limit = limit;
    }
    let raw = load_raw_results(input)?;
    tracing::info!(records = raw.len(), path = %input.display(), "ranking offline results");
    Ok(rank_results(raw, &options)?)
}

/// Read `[{"title": .., "link": .., "snippet": ..}, ..]` from `path`.
pub fn load_raw_results(path: &Path) -> Result<Vec<RawResult>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| HunterError::Input(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfileConfig;

    fn config() -> HunterConfig {
        HunterConfig {
            profile: ProfileConfig {
                required: vec!["ESG".into()],
                bonus: vec!["partnerships".into()],
                locations: vec!["Tel Aviv".into()],
                excluded: vec!["intern".into()],
            },
            ..Default::default()
        }
    }

    #[test]
    fn rank_file_reads_json_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results.json");
        std::fs::write(
            &path,
            r#"[
                {"title": "ESG Partnerships Lead, Tel Aviv", "link": "https://a.org/1", "snippet": "Full-time role"},
                {"title": "ESG Intern", "link": "https://a.org/2", "snippet": "Internship program"}
            ]"#,
        )
        .expect("write");

        let digest = rank_file(&config(), &path, None).expect("rank");
        assert_eq!(digest.entries.len(), 1);
        assert!((digest.entries[0].score - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn limit_override_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results.json");
        std::fs::write(
            &path,
            r#"[{"title": "ESG", "link": "https://a.org/1"}, {"title": "ESG", "link": "https://a.org/2"}]"#,
        )
        .expect("write");
        let mut cfg = config();
        cfg.digest.limit = Some(2);
        assert_eq!(rank_file(&cfg, &path, Some(1)).expect("rank").entries.len(), 1);
        assert_eq!(rank_file(&cfg, &path, None).expect("rank").entries.len(), 2);
    }

    #[test]
    fn non_array_input_is_input_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results.json");
        std::fs::write(&path, r#"{"items": []}"#).expect("write");
        let err = rank_file(&config(), &path, None).unwrap_err();
        assert!(matches!(err, HunterError::Input(_)));
    }

    struct FixedProvider;

    impl SearchProvider for FixedProvider {
        async fn search(
            &self,
            query: &jobhunt_search::SiteQuery,
        ) -> std::result::Result<Vec<RawResult>, jobhunt_search::SearchError> {
            let site = query.site.clone().unwrap_or_default();
            Ok(vec![
                RawResult::new("ESG Partnerships Lead, Tel Aviv", "https://jobs.example.com/1", "")
                    .with_source(site.clone()),
                RawResult::new("ESG Analyst", "https://jobs.example.com/2", "").with_source(site),
            ])
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn search_with_ranks_and_merges_sites() {
        let mut cfg = config();
        cfg.search.sites = vec!["a.org".into(), "b.org".into()];
        let (text, digest) = search_with(&FixedProvider, &cfg, None, None)
            .await
            .expect("search");
        assert_eq!(text, "ESG partnerships Tel Aviv");
        assert_eq!(digest.stats.received, 4);
        assert_eq!(digest.stats.duplicates, 2);
        assert_eq!(digest.entries[0].result.sources, vec!["a.org", "b.org"]);
        assert!((digest.entries[0].score - 14.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn search_with_explicit_query_and_limit() {
        let (text, digest) = search_with(&FixedProvider, &config(), Some("climate"), Some(1))
            .await
            .expect("search");
        assert_eq!(text, "climate Tel Aviv");
        assert_eq!(digest.entries.len(), 1);
    }

    #[tokio::test]
    async fn run_search_rejects_invalid_config_before_requests() {
        let mut cfg = config();
        cfg.digest.limit = Some(-3);
        let err = run_search(&cfg, None, None).await.unwrap_err();
        assert!(matches!(err, HunterError::Config(_)));
    }
}
