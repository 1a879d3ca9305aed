//! Extraction of the duplicate set from parsed occurrences.

use std::collections::{BTreeMap, BTreeSet};

use crate::duplicates::{DuplicateEntry, DuplicateSet};
use crate::graph::Occurrence;

/// Groups occurrences by package and keeps packages seen at two or more
/// distinct versions.
///
/// Repeated occurrences of one version (several paths to the same package)
/// count once. The result does not depend on occurrence order.
#[must_use]
pub fn extract(occurrences: &[Occurrence]) -> DuplicateSet {
    let mut versions_by_name: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for occurrence in occurrences {
        versions_by_name
            .entry(occurrence.name.as_str())
            .or_default()
            .insert(occurrence.version.as_str());
    }

    let packages = versions_by_name.len();
    let set: DuplicateSet = versions_by_name
        .into_iter()
        .filter(|(_, versions)| versions.len() >= 2)
        .map(|(name, versions)| DuplicateEntry::new(name, versions))
        .collect();
    tracing::debug!(packages, duplicates = set.len(), "extracted duplicate set");
    set
}
