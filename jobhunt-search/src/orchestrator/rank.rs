//! Final ordering of scored entries.

use crate::types::ScoredEntry;

/// Sort entries by descending score and truncate to `limit`.
///
/// The sort is stable: entries with equal scores keep their input order,
/// so identical input always ranks identically. `Some(0)` yields an empty
/// digest; `None` keeps every entry.
pub fn rank(mut entries: Vec<ScoredEntry>, limit: Option<usize>) -> Vec<ScoredEntry> {
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}
