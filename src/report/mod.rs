//! Verdict reporting.
//!
//! A drifting diff is rendered as a unified diff against the baseline file,
//! using canonical entry lines, so the report can be applied with `patch -p1`
//! to bring the baseline up to date.

use std::path::Path;

use crate::diff::DuplicateDiff;
use crate::duplicates::canonical::entry_line;
use crate::duplicates::DuplicateEntry;
use crate::error::AuditError;

/// Outcome of an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The duplicate set matches the baseline.
    Clean,
    /// The duplicate set drifted from the baseline.
    Drift,
}

/// Returns the verdict for `diff`.
#[must_use]
pub fn verdict(diff: &DuplicateDiff) -> Verdict {
    if diff.is_clean() {
        Verdict::Clean
    } else {
        Verdict::Drift
    }
}

/// Renders `diff` for standard output.
///
/// A clean diff renders a single line. A drifting diff renders a unified
/// diff with one hunk covering the whole baseline file.
///
/// # Errors
///
/// Returns [`AuditError::Format`] if an entry cannot be written in
/// canonical form.
pub fn render(diff: &DuplicateDiff, baseline_path: &Path) -> Result<String, AuditError> {
    let path = baseline_path.display();
    if diff.is_clean() {
        let approved = diff.unchanged.len();
        return Ok(format!(
            "No duplicate drift detected against {path} ({approved} approved duplicate{}).\n",
            if approved == 1 { "" } else { "s" }
        ));
    }

    // (identity, rank, prefix, line); rank keeps `-` ahead of `+` for a
    // changed identity.
    let mut lines: Vec<(&str, u8, char, String)> = Vec::new();
    for entry in &diff.unchanged {
        lines.push((entry.name.as_str(), 0, ' ', entry_line(entry)?));
    }
    for entry in &diff.removed {
        lines.push((entry.name.as_str(), 1, '-', entry_line(entry)?));
    }
    for entry in &diff.added {
        lines.push((entry.name.as_str(), 2, '+', entry_line(entry)?));
    }
    lines.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    let old_len = diff.unchanged.len() + diff.removed.len();
    let new_len = diff.unchanged.len() + diff.added.len();
    let mut out = format!("--- a/{path}\n+++ b/{path}\n");
    out.push_str(&format!("@@ -{} +{} @@\n", range(old_len), range(new_len)));
    for (_, _, prefix, line) in lines {
        out.push(prefix);
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// One instruction per drifted package explaining how to reconcile it.
#[must_use]
pub fn guidance(diff: &DuplicateDiff) -> Vec<String> {
    let mut notes: Vec<(&str, String)> = Vec::new();
    for entry in &diff.added {
        let note = match diff.removed.iter().find(|old| old.name == entry.name) {
            Some(old) => {
                format!("[CHANGED] {}: {} -> {}", entry.name, versions(old), versions(entry))
            }
            None => format!(
                "[ADDED]   {} {}: remove the duplication or add it to the baseline",
                entry.name,
                versions(entry)
            ),
        };
        notes.push((entry.name.as_str(), note));
    }
    for entry in &diff.removed {
        if !diff.added.iter().any(|new| new.name == entry.name) {
            notes.push((
                entry.name.as_str(),
                format!(
                    "[REMOVED] {} {}: no longer duplicated, remove it from the baseline",
                    entry.name,
                    versions(entry)
                ),
            ));
        }
    }
    notes.sort_by(|a, b| a.0.cmp(b.0));
    notes.into_iter().map(|(_, note)| note).collect()
}

fn versions(entry: &DuplicateEntry) -> String {
    entry.versions.join(" ")
}

fn range(len: usize) -> String {
    if len == 0 {
        "0,0".to_string()
    } else {
        format!("1,{len}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use crate::duplicates::DuplicateSet;
    use pretty_assertions::assert_eq;

    fn set(entries: &[(&str, &[&str])]) -> DuplicateSet {
        entries
            .iter()
            .map(|&(name, versions)| DuplicateEntry::new(name, versions.iter().copied()))
            .collect()
    }

    #[test]
    fn clean_report_counts_approved_duplicates() {
        let s = set(&[("A", &["1.0", "2.0"][..])]);
        let text = render(&diff(&s, &s), Path::new("duplicates.txt")).unwrap();
        assert_eq!(
            text,
            "No duplicate drift detected against duplicates.txt (1 approved duplicate).\n"
        );
        assert_eq!(verdict(&diff(&s, &s)), Verdict::Clean);
    }

    #[test]
    fn drift_renders_single_hunk_patch() {
        let current = set(&[
            ("A", &["1.0", "2.0", "3.0"][..]),
            ("B", &["0.1", "0.2"][..]),
            ("D", &["1", "2"][..]),
        ]);
        let baseline = set(&[
            ("A", &["1.0", "2.0"][..]),
            ("C", &["4.0", "5.0"][..]),
            ("D", &["1", "2"][..]),
        ]);
        let d = diff(&current, &baseline);
        assert_eq!(verdict(&d), Verdict::Drift);

        let text = render(&d, Path::new("ci/duplicates.txt")).unwrap();
        assert_eq!(
            text,
            "\
--- a/ci/duplicates.txt
+++ b/ci/duplicates.txt
@@ -1,3 +1,3 @@
-A 1.0 2.0
+A 1.0 2.0 3.0
+B 0.1 0.2
-C 4.0 5.0
 D 1 2
"
        );
    }

    #[test]
    fn drift_from_empty_baseline_uses_empty_old_range() {
        let current = set(&[("A", &["1.0", "2.0"][..])]);
        let text = render(&diff(&current, &DuplicateSet::new()), Path::new("duplicates.txt"))
            .unwrap();
        assert!(text.contains("@@ -0,0 +1,1 @@\n+A 1.0 2.0\n"));
    }

    #[test]
    fn drift_to_empty_current_uses_empty_new_range() {
        let baseline = set(&[("A", &["1.0", "2.0"][..])]);
        let text = render(&diff(&DuplicateSet::new(), &baseline), Path::new("duplicates.txt"))
            .unwrap();
        assert!(text.contains("@@ -1,1 +0,0 @@\n-A 1.0 2.0\n"));
    }

    #[test]
    fn guidance_names_each_change() {
        let current = set(&[("A", &["1.0", "2.0", "3.0"][..]), ("B", &["0.1", "0.2"][..])]);
        let baseline = set(&[("A", &["1.0", "2.0"][..]), ("C", &["4.0", "5.0"][..])]);
        let notes = guidance(&diff(&current, &baseline));
        assert_eq!(
            notes,
            vec![
                "[CHANGED] A: 1.0 2.0 -> 1.0 2.0 3.0".to_string(),
                "[ADDED]   B 0.1 0.2: remove the duplication or add it to the baseline".to_string(),
                "[REMOVED] C 4.0 5.0: no longer duplicated, remove it from the baseline"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn clean_diff_needs_no_guidance() {
        assert!(guidance(&DuplicateDiff::default()).is_empty());
    }
}
