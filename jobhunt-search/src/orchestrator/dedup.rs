//! Result deduplication by identity key.
//!
//! Groups normalised results that refer to the same posting and keeps the
//! variant carrying the most information (longest snippet). Tracks every
//! site that contributed the posting.

use std::collections::HashMap;

use crate::types::NormalizedResult;

/// Deduplicate normalised results by identity key.
///
/// Within a group the representative is the record with the longest
/// snippet, counted in characters; ties go to the earliest occurrence. The
/// representative's `sources` become the union of the group's sources in
/// first-seen order.
///
/// The output preserves the order in which each identity key first
/// appeared in the input.
pub fn deduplicate(results: Vec<NormalizedResult>) -> Vec<NormalizedResult> {
    // identity key → index into `kept`.
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(results.len());
    let mut kept: Vec<NormalizedResult> = Vec::with_capacity(results.len());

    for result in results {
        match slots.get(&result.identity_key) {
            Some(&slot) => {
                let best = &mut kept[slot];
                let mut sources = std::mem::take(&mut best.sources);
                for source in &result.sources {
                    if !sources.contains(source) {
                        sources.push(source.clone());
                    }
                }
                if result.snippet.chars().count() > best.snippet.chars().count() {
                    *best = result;
                }
                best.sources = sources;
            }
            None => {
                slots.insert(result.identity_key.clone(), kept.len());
                kept.push(result);
            }
        }
    }

    kept
}
