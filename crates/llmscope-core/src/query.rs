//! Query engine: field, date-range and free-text filtering
//!
//! Filtering is stable: matching entries keep their relative order and
//! inputs are never modified.

use tracing::debug;

use crate::models::{FilterCriteria, LogEntry};

/// Entries matching every active constraint in `criteria`
pub fn apply(entries: &[LogEntry], criteria: &FilterCriteria) -> Vec<LogEntry> {
    let needle = criteria.active_search().map(str::to_lowercase);

    let matched: Vec<LogEntry> = entries
        .iter()
        .filter(|entry| {
            matches_fields(entry, criteria)
                && needle.as_deref().is_none_or(|needle| contains_text(entry, needle))
        })
        .cloned()
        .collect();

    debug!(
        input = entries.len(),
        matched = matched.len(),
        search = needle.is_some(),
        "Applied filter criteria"
    );

    matched
}

/// Whether a single entry satisfies `criteria`, search included
pub fn matches(entry: &LogEntry, criteria: &FilterCriteria) -> bool {
    matches_fields(entry, criteria)
        && criteria
            .active_search()
            .is_none_or(|query| contains_text(entry, &query.to_lowercase()))
}

/// Free-text search alone; a blank query returns every entry
pub fn search(entries: &[LogEntry], query: &str) -> Vec<LogEntry> {
    if query.trim().is_empty() {
        return entries.to_vec();
    }

    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| contains_text(entry, &needle))
        .cloned()
        .collect()
}

/// Equality and date-range constraints, ignoring search
pub fn matches_fields(entry: &LogEntry, criteria: &FilterCriteria) -> bool {
    if criteria.user_id.is_some_and(|id| entry.user_id != id) {
        return false;
    }
    if criteria.tenant_id.is_some_and(|id| entry.tenant_id != id) {
        return false;
    }
    if criteria.model.as_ref().is_some_and(|model| entry.model != *model) {
        return false;
    }
    if criteria.status.as_ref().is_some_and(|status| entry.status != *status) {
        return false;
    }
    if criteria.date_from.is_some_and(|from| entry.timestamp < from) {
        return false;
    }
    if criteria.date_to.is_some_and(|to| entry.timestamp > to) {
        return false;
    }
    true
}

/// `needle` must already be lowercase
fn contains_text(entry: &LogEntry, needle: &str) -> bool {
    [
        entry.question.as_str(),
        entry.response.as_str(),
        entry.request_id.as_str(),
        entry.model.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
