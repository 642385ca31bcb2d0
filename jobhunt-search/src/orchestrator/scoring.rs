//! Keyword scoring for job postings.
//!
//! Assigns scores based on which profile terms occur in a result's
//! lowercased title and snippet:
//!
//! ```text
//! score = W_required * |matched_required|
//!       + W_bonus    * |matched_bonus|
//!       + W_location * |matched_locations|
//! ```
//!
//! Matching is plain substring containment. There is no stemming and no
//! fuzzy matching.

use std::collections::BTreeSet;

use crate::config::{RequiredGate, ScoringWeights};
use crate::profile::KeywordProfile;
use crate::types::{NormalizedResult, ScoreOutcome, ScoredEntry};

/// Score one normalised result against a keyword profile.
///
/// 1. If any excluded term occurs, the result is [`ScoreOutcome::Excluded`].
/// 2. If a required term is missing, `gate` decides: under
///    [`RequiredGate::ZeroBase`] the required component is 0 and bonus and
///    location terms still count; under [`RequiredGate::Drop`] the result is
///    [`ScoreOutcome::Gated`].
/// 3. Otherwise the full formula applies.
///
/// The matched-term sets always record every term found, including
/// required terms of a result that failed the gate.
pub fn score(
    result: NormalizedResult,
    profile: &KeywordProfile,
    weights: &ScoringWeights,
    gate: RequiredGate,
) -> ScoreOutcome {
    let text = result.search_text.as_str();

    if let Some(term) = profile.excluded().iter().find(|t| text.contains(t.as_str())) {
        tracing::trace!(link = %result.link, term = %term, "result excluded");
        return ScoreOutcome::Excluded;
    }

    let matched_required = matched_terms(profile.required(), text);
    let gate_passed = matched_required.len() == profile.required().len();
    if !gate_passed && gate == RequiredGate::Drop {
        return ScoreOutcome::Gated;
    }

    let matched_bonus = matched_terms(profile.bonus(), text);
    let matched_locations = matched_terms(profile.locations(), text);

    let required_component = if gate_passed {
        weights.required_weight * matched_required.len() as f64
    } else {
        0.0
    };
    let score = required_component
        + weights.bonus_weight * matched_bonus.len() as f64
        + weights.location_weight * matched_locations.len() as f64;

    ScoreOutcome::Scored(ScoredEntry {
        result,
        score,
        matched_required,
        matched_bonus,
        matched_locations,
    })
}

fn matched_terms(terms: &BTreeSet<String>, text: &str) -> BTreeSet<String> {
    terms
        .iter()
        .filter(|term| text.contains(term.as_str()))
        .cloned()
        .collect()
}
