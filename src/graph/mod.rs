//! Dependency graph input: raw tool output parsed into package occurrences.
//!
//! Raw text from `cargo tree`, `Cargo.lock`, or `cargo metadata` is handled
//! only by [`parse`]. Everything downstream sees [`Occurrence`] records.

pub mod extract;
pub mod parse;

use std::fmt;

use serde::Deserialize;

pub use extract::extract;
pub use parse::parse;

/// One resolved package seen in the graph.
///
/// The same package/version pair may occur many times when it is reachable
/// through several dependency paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Package identity.
    pub name: String,
    /// Resolved version, without cargo's leading `v`.
    pub version: String,
    /// 1-based line (or record index) in the source.
    pub line: usize,
}

impl Occurrence {
    /// Creates an occurrence.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            line,
        }
    }
}

/// Supported raw graph formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GraphFormat {
    /// `cargo tree` output with `--prefix indent` or `--prefix none`.
    #[default]
    Tree,
    /// A `Cargo.lock` file.
    Lock,
    /// `cargo metadata --format-version 1` JSON.
    Metadata,
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tree => "tree",
            Self::Lock => "lock",
            Self::Metadata => "metadata",
        })
    }
}
