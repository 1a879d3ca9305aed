//! Optional YAML configuration file.
//!
//! ```yaml
//! baseline: ci/duplicates.txt
//! format: lock
//! input: Cargo.lock
//! # or: command: cargo tree --workspace --prefix none -e normal
//! ```
//!
//! Every key is optional; command-line flags take precedence.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::context::ServiceContext;
use crate::error::AuditError;
use crate::graph::GraphFormat;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_PATH: &str = "dupcheck.yaml";

/// Settings read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Baseline file path.
    pub baseline: Option<PathBuf>,
    /// Format of the raw graph.
    pub format: Option<GraphFormat>,
    /// Command printing the raw graph.
    pub command: Option<String>,
    /// File holding the raw graph.
    pub input: Option<PathBuf>,
}

impl AuditConfig {
    /// Loads the config file.
    ///
    /// An `explicit` path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
    /// read if present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::NotFound`] for a missing explicit path,
    /// [`AuditError::Io`] if the file cannot be read, and
    /// [`AuditError::Config`] if it is not valid config YAML.
    pub fn load(ctx: &ServiceContext, explicit: Option<&Path>) -> Result<Self, AuditError> {
        let path = match explicit {
            Some(path) if !ctx.fs.exists(path) => {
                return Err(AuditError::NotFound { path: path.to_path_buf() });
            }
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if !ctx.fs.exists(default) {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = ctx.fs.read_to_string(path).map_err(|source| AuditError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // An empty document deserializes as unit, not as an empty map.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&text).map_err(|e| AuditError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
