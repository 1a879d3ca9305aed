//! Parsers for raw dependency graph text.
//!
//! Accepted grammars:
//!
//! - [`GraphFormat::Tree`]: `cargo tree` output, `--prefix indent` or
//!   `--prefix none`, either charset. Each non-blank line is
//!   `<name> v<version> [annotations...]` after the tree-drawing prefix is
//!   stripped. Section headers such as `[dev-dependencies]` are skipped, and
//!   trailing annotations like `(*)`, `(proc-macro)`, or a source path are
//!   ignored. Feature edges (`-e features`) are not accepted.
//! - [`GraphFormat::Lock`]: a `Cargo.lock` document; one occurrence per
//!   `[[package]]` table.
//! - [`GraphFormat::Metadata`]: `cargo metadata --format-version 1` JSON; one
//!   occurrence per element of `packages`.
//!
//! Records are numbered from 1 in both structured formats, matching
//! [`Occurrence::line`].

use serde::Deserialize;

use crate::error::AuditError;
use crate::graph::{GraphFormat, Occurrence};

/// Parses raw graph text in the given format.
///
/// # Errors
///
/// Returns [`AuditError::Parse`] naming the first malformed line or record.
/// Nothing is recovered from partially valid input.
pub fn parse(format: GraphFormat, text: &str) -> Result<Vec<Occurrence>, AuditError> {
    let occurrences = match format {
        GraphFormat::Tree => parse_tree(text)?,
        GraphFormat::Lock => parse_lock(text)?,
        GraphFormat::Metadata => parse_metadata(text)?,
    };
    tracing::debug!(%format, occurrences = occurrences.len(), "parsed dependency graph");
    Ok(occurrences)
}

fn parse_tree(text: &str) -> Result<Vec<Occurrence>, AuditError> {
    let mut occurrences = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_tree_prefix(raw).trim_end();
        if line.is_empty() || (line.starts_with('[') && line.ends_with(']')) {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(name), Some(version)) = (tokens.next(), tokens.next()) else {
            return Err(AuditError::parse(
                format!("line {line_no}"),
                format!("expected `<name> v<version>`, found `{}`", raw.trim()),
            ));
        };
        let Some(version) = version.strip_prefix('v').filter(|v| !v.is_empty()) else {
            return Err(AuditError::parse(
                format!("line {line_no}"),
                format!("`{version}` is not a version (expected `v<version>`) in `{}`", raw.trim()),
            ));
        };
        occurrences.push(Occurrence::new(name, version, line_no));
    }
    Ok(occurrences)
}

/// Removes the box-drawing (or `--charset ascii`) indent cargo draws in front
/// of each package.
fn strip_tree_prefix(line: &str) -> &str {
    line.trim_start_matches(|c: char| {
        matches!(c, '│' | '├' | '└' | '─' | '|' | '`' | '-') || c.is_whitespace()
    })
}

#[derive(Deserialize)]
struct LockFile {
    #[serde(default)]
    package: Vec<toml::Table>,
}

fn parse_lock(text: &str) -> Result<Vec<Occurrence>, AuditError> {
    let lock: LockFile = toml::from_str(text)
        .map_err(|e| AuditError::parse("Cargo.lock", e.to_string().trim_end()))?;
    lock.package
        .iter()
        .enumerate()
        .map(|(idx, table)| {
            let record = idx + 1;
            let field = |key: &str| {
                table.get(key).and_then(toml::Value::as_str).ok_or_else(|| {
                    AuditError::parse(
                        format!("[[package]] #{record}"),
                        format!("missing string field `{key}`"),
                    )
                })
            };
            Ok(Occurrence::new(field("name")?, field("version")?, record))
        })
        .collect()
}

#[derive(Deserialize)]
struct Metadata {
    packages: Vec<serde_json::Value>,
}

fn parse_metadata(text: &str) -> Result<Vec<Occurrence>, AuditError> {
    let metadata: Metadata = serde_json::from_str(text).map_err(|e| {
        AuditError::parse(format!("line {} column {}", e.line(), e.column()), e.to_string())
    })?;
    metadata
        .packages
        .iter()
        .enumerate()
        .map(|(idx, package)| {
            let record = idx + 1;
            let field = |key: &str| {
                package.get(key).and_then(serde_json::Value::as_str).ok_or_else(|| {
                    AuditError::parse(
                        format!("packages #{record}"),
                        format!("missing string field `{key}`"),
                    )
                })
            };
            Ok(Occurrence::new(field("name")?, field("version")?, record))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(occurrences: &[Occurrence]) -> Vec<(&str, &str)> {
        occurrences.iter().map(|o| (o.name.as_str(), o.version.as_str())).collect()
    }

    #[test]
    fn parses_indented_tree() {
        let text = "\
dupcheck v0.1.0 (/work/dupcheck)
├── clap v4.5.4
│   ├── clap_builder v4.5.2
│   │   └── bitflags v2.4.0
│   └── clap_derive v4.5.4 (proc-macro)
└── toml v0.8.12
    └── serde v1.0.197 (*)
[dev-dependencies]
└── tempfile v3.10.1
    └── bitflags v1.3.2
";
        let occurrences = parse(GraphFormat::Tree, text).unwrap();
        assert_eq!(
            pairs(&occurrences),
            vec![
                ("dupcheck", "0.1.0"),
                ("clap", "4.5.4"),
                ("clap_builder", "4.5.2"),
                ("bitflags", "2.4.0"),
                ("clap_derive", "4.5.4"),
                ("toml", "0.8.12"),
                ("serde", "1.0.197"),
                ("tempfile", "3.10.1"),
                ("bitflags", "1.3.2"),
            ]
        );
        assert_eq!(occurrences[8].line, 10);
    }

    #[test]
    fn parses_flat_tree_with_blank_separators() {
        let text = "a v1.0.0\nb v2.0.0\n\nc v0.1.0 (*)\n";
        let occurrences = parse(GraphFormat::Tree, text).unwrap();
        assert_eq!(pairs(&occurrences), vec![("a", "1.0.0"), ("b", "2.0.0"), ("c", "0.1.0")]);
    }

    #[test]
    fn parses_ascii_charset() {
        let text = "root v0.1.0\n|-- a v1.0.0\n|   `-- b v2.0.0\n`-- c v3.0.0\n";
        let occurrences = parse(GraphFormat::Tree, text).unwrap();
        assert_eq!(
            pairs(&occurrences),
            vec![("root", "0.1.0"), ("a", "1.0.0"), ("b", "2.0.0"), ("c", "3.0.0")]
        );
    }

    #[test]
    fn tree_rejects_missing_version() {
        let err = parse(GraphFormat::Tree, "a v1.0.0\n└── lonely\n").unwrap_err();
        match err {
            AuditError::Parse { line, message } => {
                assert_eq!(line, "line 2");
                assert!(message.contains("lonely"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn tree_rejects_version_without_prefix() {
        let err = parse(GraphFormat::Tree, "a 1.0.0\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
        assert!(err.to_string().contains("`1.0.0` is not a version"));
    }

    #[test]
    fn tree_rejects_bare_v() {
        assert!(matches!(parse(GraphFormat::Tree, "a v\n"), Err(AuditError::Parse { .. })));
    }

    #[test]
    fn parses_lockfile() {
        let text = r#"
version = 3

[[package]]
name = "bitflags"
version = "1.3.2"
source = "registry+https://github.com/rust-lang/crates.io-index"

[[package]]
name = "bitflags"
version = "2.4.0"

[[package]]
name = "dupcheck"
version = "0.1.0"
dependencies = ["bitflags 1.3.2", "bitflags 2.4.0"]
"#;
        let occurrences = parse(GraphFormat::Lock, text).unwrap();
        assert_eq!(
            pairs(&occurrences),
            vec![("bitflags", "1.3.2"), ("bitflags", "2.4.0"), ("dupcheck", "0.1.0")]
        );
    }

    #[test]
    fn lockfile_without_packages_is_empty() {
        assert!(parse(GraphFormat::Lock, "version = 3\n").unwrap().is_empty());
    }

    #[test]
    fn lockfile_rejects_missing_version() {
        let text = "[[package]]\nname = \"a\"\nversion = \"1.0.0\"\n\n[[package]]\nname = \"b\"\n";
        let err = parse(GraphFormat::Lock, text).unwrap_err();
        assert!(err.to_string().contains("[[package]] #2"));
        assert!(err.to_string().contains("`version`"));
    }

    #[test]
    fn lockfile_rejects_invalid_toml() {
        assert!(matches!(parse(GraphFormat::Lock, "[[package]\n"), Err(AuditError::Parse { .. })));
    }

    #[test]
    fn parses_metadata() {
        let text = r#"{
            "packages": [
                {"name": "syn", "version": "1.0.109", "id": "syn 1.0.109"},
                {"name": "syn", "version": "2.0.52", "id": "syn 2.0.52"}
            ],
            "workspace_members": []
        }"#;
        let occurrences = parse(GraphFormat::Metadata, text).unwrap();
        assert_eq!(pairs(&occurrences), vec![("syn", "1.0.109"), ("syn", "2.0.52")]);
    }

    #[test]
    fn metadata_rejects_missing_name() {
        let err = parse(GraphFormat::Metadata, r#"{"packages": [{"version": "1.0.0"}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("packages #1"));
        assert!(err.to_string().contains("`name`"));
    }

    #[test]
    fn metadata_rejects_invalid_json() {
        let err = parse(GraphFormat::Metadata, "{\"packages\": [").unwrap_err();
        assert!(matches!(err, AuditError::Parse { .. }));
        assert!(err.to_string().contains("line 1"));
    }
}
