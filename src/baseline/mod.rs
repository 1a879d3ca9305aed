//! Baseline store: the committed record of approved duplicates.
//!
//! The baseline is a plain-text file in canonical form (see
//! [`crate::duplicates::canonical`]), so `dupcheck --print-current` output
//! can be written over it verbatim. An empty file is a valid baseline with
//! no approved duplicates; a missing file is an error.
//!
//! The file must be byte-for-byte canonical. The drift report is a patch
//! against the canonical lines, and it only applies if the file on disk
//! holds exactly those lines.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::duplicates::{canonicalize, parse_canonical, DuplicateSet};
use crate::error::{decode_utf8, AuditError};

/// Default baseline location, relative to the working directory.
pub const DEFAULT_BASELINE_PATH: &str = "duplicates.txt";

/// Read access to the baseline file.
///
/// All I/O goes through `ctx.fs`.
pub struct BaselineStore<'a> {
    ctx: &'a ServiceContext,
    path: PathBuf,
}

impl<'a> BaselineStore<'a> {
    /// Creates a store for the baseline at `path`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, path: &Path) -> Self {
        Self {
            ctx,
            path: path.to_path_buf(),
        }
    }

    /// Path of the baseline file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and parses the baseline.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::NotFound`] if the file is absent,
    /// [`AuditError::Io`] if it cannot be read, and [`AuditError::Format`]
    /// naming the line if its content is malformed, not UTF-8, or not in
    /// canonical form.
    pub fn load(&self) -> Result<DuplicateSet, AuditError> {
        if !self.ctx.fs.exists(&self.path) {
            return Err(AuditError::NotFound {
                path: self.path.clone(),
            });
        }
        let bytes = self.ctx.fs.read(&self.path).map_err(|source| AuditError::Io {
            path: self.path.clone(),
            source,
        })?;
        let origin = self.path.display().to_string();
        let text = decode_utf8(bytes)
            .map_err(|line| AuditError::format(format!("{origin}:{line}"), "not valid UTF-8"))?;
        let baseline = parse_canonical(&text, &origin)?;

        let canonical = canonicalize(&baseline)?;
        if canonical != text {
            return Err(AuditError::format(
                format!("{origin}:{}", first_difference(&text, &canonical)),
                "baseline is not in canonical form (sorted, one space between fields, \
                 no blank lines, trailing newline); regenerate it with \
                 `dupcheck --print-current`",
            ));
        }

        tracing::debug!(path = %self.path.display(), entries = baseline.len(), "loaded baseline");
        Ok(baseline)
    }
}

/// 1-based line where `text` first departs from `canonical`.
fn first_difference(text: &str, canonical: &str) -> usize {
    let common = text
        .lines()
        .zip(canonical.lines())
        .take_while(|(a, b)| a == b)
        .count();
    let last = text.lines().count().max(canonical.lines().count()).max(1);
    (common + 1).min(last)
}
