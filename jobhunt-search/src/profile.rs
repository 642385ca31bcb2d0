//! Keyword profile: the validated term sets that drive scoring.
//!
//! Terms are trimmed and lowercased on construction, so every match in the
//! scorer is a plain substring test against lowercased text.

use std::collections::BTreeSet;

use crate::error::{Result, SearchError};

/// Required, bonus, location and exclusion terms for one search profile.
///
/// Built with [`KeywordProfile::new`], which rejects empty terms and any
/// term that is both required and excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordProfile {
    required: BTreeSet<String>,
    bonus: BTreeSet<String>,
    locations: BTreeSet<String>,
    excluded: BTreeSet<String>,
}

impl KeywordProfile {
    /// Builds a profile from raw term lists.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if any term is blank, or if a term
    /// appears (case-insensitively) in both `required` and `excluded`.
    pub fn new<I, S>(required: I, bonus: I, locations: I, excluded: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let profile = Self {
            required: normalize_terms("required", required)?,
            bonus: normalize_terms("bonus", bonus)?,
            locations: normalize_terms("locations", locations)?,
            excluded: normalize_terms("excluded", excluded)?,
        };

        let overlap: Vec<&str> = profile
            .required
            .intersection(&profile.excluded)
            .map(String::as_str)
            .collect();
        if !overlap.is_empty() {
            return Err(SearchError::Config(format!(
                "terms are both required and excluded: {}",
                overlap.join(", ")
            )));
        }

        Ok(profile)
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn bonus(&self) -> &BTreeSet<String> {
        &self.bonus
    }

    pub fn locations(&self) -> &BTreeSet<String> {
        &self.locations
    }

    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// Returns `true` if the profile has no terms at all.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
            && self.bonus.is_empty()
            && self.locations.is_empty()
            && self.excluded.is_empty()
    }
}

fn normalize_terms<I, S>(kind: &str, terms: I) -> Result<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = BTreeSet::new();
    for term in terms {
        let term = collapse_whitespace(&term.as_ref().to_lowercase());
        if term.is_empty() {
            return Err(SearchError::Config(format!(
                "{kind} terms must not be empty"
            )));
        }
        set.insert(term);
    }
    Ok(set)
}

/// Trims and collapses internal whitespace runs to a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
