//! Error taxonomy for the audit pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for a clean audit.
pub const EXIT_CLEAN: u8 = 0;
/// Exit code when the duplicate set drifted from the baseline.
pub const EXIT_DRIFT: u8 = 1;
/// Exit code for configuration, input, and environment faults.
pub const EXIT_ERROR: u8 = 2;

/// Every way an audit run can fail.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The raw dependency graph could not be parsed.
    #[error("failed to parse dependency graph at {line}: {message}")]
    Parse {
        /// Line (or record) that could not be parsed, e.g. `line 12`.
        line: String,
        /// What was wrong with it.
        message: String,
    },

    /// The baseline is malformed, or an identity/version cannot be
    /// represented in canonical form.
    #[error("invalid duplicate entry at {location}: {message}")]
    Format {
        /// File and line, or the offending value.
        location: String,
        /// What was wrong with it.
        message: String,
    },

    /// A required file does not exist.
    #[error("{} not found; commit an explicit (possibly empty) file at this path", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The current duplicate set differs from the baseline.
    #[error(
        "duplicate dependencies drifted from the baseline ({added} added, {removed} removed); \
         remove the new duplication or update the baseline"
    )]
    Drift {
        /// Number of entries present now but not in the baseline.
        added: usize,
        /// Number of baseline entries no longer present.
        removed: usize,
    },

    /// A file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The dependency graph command could not be run or failed.
    #[error("dependency graph command `{command}` failed{}: {stderr}", exit_suffix(*code))]
    Command {
        /// The command line that was run.
        command: String,
        /// Exit code, when the process ran at all.
        code: Option<i32>,
        /// Captured standard error (or the spawn failure).
        stderr: String,
    },

    /// The config file could not be parsed.
    #[error("invalid config {}: {message}", path.display())]
    Config {
        /// The config file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Command-line arguments were rejected.
    #[error("{0}")]
    Usage(String),
}

impl AuditError {
    /// Process exit code for this error.
    ///
    /// Drift is the expected signal of a working audit and gets its own code
    /// so CI can tell it apart from a broken setup.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Drift { .. } => EXIT_DRIFT,
            _ => EXIT_ERROR,
        }
    }

    pub(crate) fn parse(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            line: line.into(),
            message: message.into(),
        }
    }

    pub(crate) fn format(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Decodes `bytes` as UTF-8, or returns the 1-based line holding the first
/// invalid byte.
pub(crate) fn decode_utf8(bytes: Vec<u8>) -> Result<String, usize> {
    String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        valid.iter().filter(|&&b| b == b'\n').count() + 1
    })
}

fn exit_suffix(code: Option<i32>) -> String {
    code.map(|c| format!(" with exit code {c}")).unwrap_or_default()
}
