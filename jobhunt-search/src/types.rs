//! Core types flowing through the ranking pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single hit as returned by a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResult {
    /// The title of the result page.
    pub title: String,
    /// Absolute URL of the result.
    pub link: String,
    /// Text snippet summarising the page.
    #[serde(default)]
    pub snippet: String,
    /// Site restriction the hit was found under, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RawResult {
    /// Creates a result with no source attribution.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            source: None,
        }
    }

    /// Attaches the site this hit was found under.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A raw result after canonicalisation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResult {
    /// Canonical form of `link`, used to recognise duplicates.
    pub identity_key: String,
    /// Whitespace-collapsed title.
    pub title: String,
    /// The link as the provider returned it.
    pub link: String,
    /// Whitespace-collapsed snippet.
    pub snippet: String,
    /// Lowercased `title + " " + snippet`, matched against keyword terms.
    #[serde(skip)]
    pub search_text: String,
    /// Every site this posting was found under, first-seen order.
    pub sources: Vec<String>,
}

/// A normalised result with its relevance score and the terms that earned it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    pub result: NormalizedResult,
    pub score: f64,
    pub matched_required: BTreeSet<String>,
    pub matched_bonus: BTreeSet<String>,
    pub matched_locations: BTreeSet<String>,
}

/// What the scorer decided for one result.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    /// The result stays in the digest with this score.
    Scored(ScoredEntry),
    /// The result contains an excluded term.
    Excluded,
    /// The result misses a required term and the gate drops such results.
    Gated,
}

/// Per-stage counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DigestStats {
    /// Raw records handed to the pipeline.
    pub received: usize,
    /// Records whose link could not be normalised.
    pub malformed: usize,
    /// Records folded into an earlier record with the same identity key.
    pub duplicates: usize,
    /// Records removed by the domain filter.
    pub filtered: usize,
    /// Records containing an excluded term.
    pub excluded: usize,
    /// Records dropped by the required-keyword gate.
    pub gated: usize,
}

/// The ranked output of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Digest {
    pub entries: Vec<ScoredEntry>,
    pub stats: DigestStats,
}

impl Digest {
    /// Returns `true` if no entry survived ranking.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of ranked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
