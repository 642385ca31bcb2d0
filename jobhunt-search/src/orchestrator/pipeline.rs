//! The pure ranking pipeline: normalise → dedup → filter → score → rank.
//!
//! Synchronous and stateless. Each stage consumes the previous stage's
//! vector and produces a new one.

use crate::config::{RequiredGate, ScoringWeights};
use crate::error::{Result, SearchError};
use crate::profile::KeywordProfile;
use crate::types::{Digest, DigestStats, RawResult, ScoreOutcome};

use super::dedup::deduplicate;
use super::filter::DomainFilter;
use super::normalize::normalize;
use super::rank::rank;
use super::scoring::score;

/// Everything the pipeline needs besides the raw records.
#[derive(Debug, Clone, Default)]
pub struct RankingOptions {
    pub profile: KeywordProfile,
    pub weights: ScoringWeights,
    pub gate: RequiredGate,
    /// Maximum digest size; `None` keeps every entry.
    pub limit: Option<usize>,
    pub domain_filter: Option<DomainFilter>,
}

impl RankingOptions {
    /// Options with default weights, gate, no limit and no domain filter.
    pub fn new(profile: KeywordProfile) -> Self {
        Self {
            profile,
            ..Default::default()
        }
    }

    /// Checks the scoring weights. The profile validates itself on
    /// construction.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if let Some(filter) = &self.domain_filter {
            if filter.trusted_suffixes.is_empty() && filter.fallback_terms.is_empty() {
                return Err(SearchError::Config(
                    "domain_filter needs trusted_suffixes or fallback_terms".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Turn a batch of raw search hits into a ranked digest.
///
/// # Pipeline
///
/// 1. Normalise each record; malformed links are logged and counted
/// 2. Deduplicate by identity key
/// 3. Apply the domain filter, if configured
/// 4. Score each survivor; excluded and gated records are counted
/// 5. Rank by score and truncate to `options.limit`
///
/// Never fails. An empty batch yields an empty digest.
pub fn build_digest(raw: Vec<RawResult>, options: &RankingOptions) -> Digest {
    let mut stats = DigestStats {
        received: raw.len(),
        ..Default::default()
    };

    // 1. Normalise.
    let mut normalized = Vec::with_capacity(raw.len());
    for record in raw {
        match normalize(record) {
            Ok(result) => normalized.push(result),
            Err(err) => {
                tracing::warn!(error = %err, "dropping malformed result");
                stats.malformed += 1;
            }
        }
    }

    // 2. Deduplicate.
    let before_dedup = normalized.len();
    let deduped = deduplicate(normalized);
    stats.duplicates = before_dedup - deduped.len();

    // 3. Domain filter.
    let candidates: Vec<_> = match &options.domain_filter {
        Some(filter) => deduped
            .into_iter()
            .filter(|result| {
                let allowed = filter.allows(result);
                if !allowed {
                    stats.filtered += 1;
                }
                allowed
            })
            .collect(),
        None => deduped,
    };

    // 4. Score.
    let mut scored = Vec::with_capacity(candidates.len());
    for result in candidates {
        match score(result, &options.profile, &options.weights, options.gate) {
            ScoreOutcome::Scored(entry) => scored.push(entry),
            ScoreOutcome::Excluded => stats.excluded += 1,
            ScoreOutcome::Gated => stats.gated += 1,
        }
    }

    // 5. Rank.
    let entries = rank(scored, options.limit);

    tracing::debug!(
        received = stats.received,
        malformed = stats.malformed,
        duplicates = stats.duplicates,
        filtered = stats.filtered,
        excluded = stats.excluded,
        gated = stats.gated,
        ranked = entries.len(),
        "digest built"
    );

    Digest { entries, stats }
}
