//! Duplicate sets: packages resolved to more than one version at once.

pub mod canonical;

use std::cmp::Ordering;
use std::collections::BTreeMap;

pub use canonical::{canonicalize, parse_canonical};

/// A package resolved to two or more distinct versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    /// Package identity, independent of version.
    pub name: String,
    /// Distinct versions, in canonical version order.
    pub versions: Vec<String>,
}

impl DuplicateEntry {
    /// Builds an entry, sorting and deduplicating `versions`.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut versions: Vec<String> = versions.into_iter().map(Into::into).collect();
        versions.sort_by(|a, b| compare_versions(a, b));
        versions.dedup();
        Self {
            name: name.into(),
            versions,
        }
    }
}

/// Set of duplicate entries keyed by package identity.
///
/// Iteration is always in canonical order: identities by byte order, and
/// each entry's versions by [`compare_versions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateSet {
    entries: BTreeMap<String, Vec<String>>,
}

impl DuplicateSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous entry for the same identity.
    ///
    /// Returns the replaced versions, if any. The entry must list at least
    /// two distinct versions; a set holding anything less cannot be
    /// canonicalized (see [`canonical::entry_line`]).
    pub fn insert(&mut self, entry: DuplicateEntry) -> Option<Vec<String>> {
        let DuplicateEntry { name, versions } = DuplicateEntry::new(entry.name, entry.versions);
        debug_assert!(versions.len() >= 2, "{name} is not duplicated: {versions:?}");
        self.entries.insert(name, versions)
    }

    /// Versions recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = DuplicateEntry> + '_ {
        self.entries.iter().map(|(name, versions)| DuplicateEntry {
            name: name.clone(),
            versions: versions.clone(),
        })
    }
}

impl FromIterator<DuplicateEntry> for DuplicateSet {
    fn from_iter<T: IntoIterator<Item = DuplicateEntry>>(iter: T) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

/// Total order over opaque version strings.
///
/// Versions that parse as SemVer come first, ordered as SemVer with the
/// raw text as tie-break. Everything else follows in byte order.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (semver::Version::parse(a), semver::Version::parse(b)) {
        (Ok(va), Ok(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
