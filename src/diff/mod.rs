//! Comparison of the current duplicate set against the baseline.

use crate::duplicates::{DuplicateEntry, DuplicateSet};

/// Differences between the current duplicate set and the baseline.
///
/// A package whose version set changed appears once in `removed` (old
/// versions) and once in `added` (new versions).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateDiff {
    /// Entries present now but not approved in the baseline.
    pub added: Vec<DuplicateEntry>,
    /// Baseline entries that no longer match the graph.
    pub removed: Vec<DuplicateEntry>,
    /// Entries identical in both.
    pub unchanged: Vec<DuplicateEntry>,
}

impl DuplicateDiff {
    /// Returns `true` if the current state matches the baseline exactly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compares `current` against `baseline`.
///
/// All three lists are ordered by package identity.
#[must_use]
pub fn diff(current: &DuplicateSet, baseline: &DuplicateSet) -> DuplicateDiff {
    let mut result = DuplicateDiff::default();

    for entry in current.entries() {
        match baseline.get(&entry.name) {
            Some(versions) if versions == entry.versions.as_slice() => {
                result.unchanged.push(entry);
            }
            _ => result.added.push(entry),
        }
    }
    for entry in baseline.entries() {
        if current.get(&entry.name) != Some(entry.versions.as_slice()) {
            result.removed.push(entry);
        }
    }

    tracing::debug!(
        added = result.added.len(),
        removed = result.removed.len(),
        unchanged = result.unchanged.len(),
        "compared duplicate set against baseline"
    );
    result
}
