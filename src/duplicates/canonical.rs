//! Canonical text form of a duplicate set.
//!
//! One line per entry, identity first, then its versions, separated by a
//! single space:
//!
//! ```text
//! bitflags 1.3.2 2.4.0
//! windows-sys 0.48.0 0.52.0
//! ```
//!
//! Lines are ordered by identity and versions by version order, so two sets
//! with the same content always produce the same bytes. The baseline file
//! uses this exact grammar.

use std::collections::HashSet;

use crate::duplicates::{DuplicateEntry, DuplicateSet};
use crate::error::AuditError;

/// Serializes a duplicate set in canonical form.
///
/// # Errors
///
/// Returns [`AuditError::Format`] if an identity or version is empty or
/// contains whitespace, or an entry lists fewer than two versions, since it
/// could not be read back.
pub fn canonicalize(set: &DuplicateSet) -> Result<String, AuditError> {
    let mut out = String::new();
    for entry in set.entries() {
        out.push_str(&entry_line(&entry)?);
        out.push('\n');
    }
    Ok(out)
}

/// Renders a single entry as its canonical line, without the newline.
///
/// # Errors
///
/// Returns [`AuditError::Format`] under the same conditions as [`canonicalize`].
pub fn entry_line(entry: &DuplicateEntry) -> Result<String, AuditError> {
    check_token(&entry.name, "package identity", &entry.name)?;
    if entry.versions.len() < 2 {
        return Err(AuditError::format(
            &entry.name,
            "a duplicate entry needs at least two versions",
        ));
    }
    for version in &entry.versions {
        check_token(version, "version", &entry.name)?;
    }
    let mut line = entry.name.clone();
    for version in &entry.versions {
        line.push(' ');
        line.push_str(version);
    }
    Ok(line)
}

/// Parses canonical text back into a duplicate set.
///
/// `origin` names the source (usually a file path) in error messages. Blank
/// lines are ignored; entries may appear in any order.
///
/// # Errors
///
/// Returns [`AuditError::Format`] naming the line when an entry lists fewer
/// than two versions, repeats a version, or repeats an identity.
pub fn parse_canonical(text: &str, origin: &str) -> Result<DuplicateSet, AuditError> {
    let mut set = DuplicateSet::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let location = format!("{origin}:{}", idx + 1);
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            continue;
        };
        let versions: Vec<&str> = tokens.collect();
        if versions.len() < 2 {
            return Err(AuditError::format(
                location,
                format!("`{line}` must list a package followed by at least two versions"),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(repeated) = versions.iter().find(|v| !seen.insert(**v)) {
            return Err(AuditError::format(
                location,
                format!("version {repeated} of {name} is listed more than once"),
            ));
        }
        if set.insert(DuplicateEntry::new(name, versions)).is_some() {
            return Err(AuditError::format(location, format!("{name} is listed more than once")));
        }
    }
    Ok(set)
}

fn check_token(token: &str, what: &str, entry: &str) -> Result<(), AuditError> {
    if token.is_empty() {
        return Err(AuditError::format(entry, format!("empty {what}")));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(AuditError::format(
            entry,
            format!("{what} `{token}` contains whitespace, which is the entry delimiter"),
        ));
    }
    Ok(())
}
