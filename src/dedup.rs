//! Per-source duplicate suppression.
//!
//! Scoped to the list being built for one source in one request; no state
//! survives between requests.

use crate::models::ContentRecord;

/// `true` if `candidate` repeats the title or the URL of an accepted record.
pub fn is_duplicate(accepted: &[ContentRecord], candidate: &ContentRecord) -> bool {
    accepted
        .iter()
        .any(|r| r.title() == candidate.title() || r.url() == candidate.url())
}

/// Append `candidate` unless it duplicates an accepted record.
///
/// Returns whether it was appended.
pub fn push_unique(accepted: &mut Vec<ContentRecord>, candidate: ContentRecord) -> bool {
    if is_duplicate(accepted, &candidate) {
        return false;
    }
    accepted.push(candidate);
    true
}
