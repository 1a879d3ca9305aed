//! The audit command: compare the live duplicate set with the baseline.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::baseline::{BaselineStore, DEFAULT_BASELINE_PATH};
use crate::cli::Cli;
use crate::config::AuditConfig;
use crate::context::ServiceContext;
use crate::diff::{diff, DuplicateDiff};
use crate::duplicates::{canonicalize, DuplicateSet};
use crate::error::{decode_utf8, AuditError};
use crate::graph::{self, GraphFormat};
use crate::report::{self, Verdict};

/// Command run when neither flags nor config name a graph source.
pub const DEFAULT_GRAPH_COMMAND: &str = "cargo tree --workspace --prefix none";

/// Where the raw dependency graph comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    /// A file on disk.
    File(PathBuf),
    /// Standard input.
    Stdin,
    /// A shell command whose stdout is the graph.
    Command(String),
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Baseline file path.
    pub baseline: PathBuf,
    /// Raw graph format.
    pub format: GraphFormat,
    /// Raw graph source.
    pub source: GraphSource,
}

impl Settings {
    /// Merges command-line flags over the config file over defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn resolve(ctx: &ServiceContext, cli: &Cli) -> Result<Self, AuditError> {
        let config = AuditConfig::load(ctx, cli.config.as_deref())?;
        Ok(Self::merge(cli, config))
    }

    fn merge(cli: &Cli, config: AuditConfig) -> Self {
        let source = match (&cli.input, &cli.command) {
            (Some(input), _) => file_source(input.clone()),
            (None, Some(command)) => GraphSource::Command(command.clone()),
            (None, None) => match (config.input, config.command) {
                (Some(input), _) => file_source(input),
                (None, Some(command)) => GraphSource::Command(command),
                (None, None) => GraphSource::Command(DEFAULT_GRAPH_COMMAND.to_string()),
            },
        };
        Self {
            baseline: cli
                .baseline
                .clone()
                .or(config.baseline)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BASELINE_PATH)),
            format: cli.format.or(config.format).unwrap_or_default(),
            source,
        }
    }
}

fn file_source(path: PathBuf) -> GraphSource {
    if path == Path::new("-") {
        GraphSource::Stdin
    } else {
        GraphSource::File(path)
    }
}

/// Result of comparing the live graph with the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audit {
    /// Duplicate set extracted from the live graph.
    pub current: DuplicateSet,
    /// Difference against the baseline.
    pub diff: DuplicateDiff,
}

/// Runs the audit and prints the report.
///
/// The report goes to stdout; per-package guidance goes to stderr.
///
/// # Errors
///
/// Returns [`AuditError::Drift`] after printing the report when the
/// duplicate set drifted, or the error that stopped the audit.
pub fn run(ctx: &ServiceContext, settings: &Settings) -> Result<(), AuditError> {
    let audit = audit(ctx, settings)?;
    print!("{}", report::render(&audit.diff, &settings.baseline)?);

    match report::verdict(&audit.diff) {
        Verdict::Clean => Ok(()),
        Verdict::Drift => {
            eprintln!();
            for note in report::guidance(&audit.diff) {
                eprintln!("  {note}");
            }
            eprintln!();
            eprintln!(
                "To accept the current state, apply the patch above or run \
                 `dupcheck --print-current > {}`.",
                settings.baseline.display()
            );
            Err(AuditError::Drift {
                added: audit.diff.added.len(),
                removed: audit.diff.removed.len(),
            })
        }
    }
}

/// Prints the live duplicate set in baseline format.
///
/// # Errors
///
/// Returns an error if the graph cannot be read, parsed, or canonicalized.
pub fn print_current(ctx: &ServiceContext, settings: &Settings) -> Result<(), AuditError> {
    let current = current_state(ctx, settings)?;
    print!("{}", canonicalize(&current)?);
    Ok(())
}

/// Extracts the live duplicate set and diffs it against the baseline.
///
/// # Errors
///
/// Returns an error if the graph or baseline cannot be read or parsed.
pub fn audit(ctx: &ServiceContext, settings: &Settings) -> Result<Audit, AuditError> {
    let current = current_state(ctx, settings)?;
    let baseline = BaselineStore::new(ctx, &settings.baseline).load()?;

    // Both sides must have a canonical form before they are compared.
    let current_text = canonicalize(&current)?;
    let baseline_text = canonicalize(&baseline)?;
    tracing::trace!(current = %current_text, baseline = %baseline_text, "canonical forms");

    let diff = diff(&current, &baseline);
    tracing::info!(clean = diff.is_clean(), "audit finished");
    Ok(Audit { current, diff })
}

fn current_state(ctx: &ServiceContext, settings: &Settings) -> Result<DuplicateSet, AuditError> {
    let raw = read_graph(ctx, &settings.source)?;
    let occurrences = graph::parse(settings.format, &raw)?;
    Ok(graph::extract(&occurrences))
}

fn read_graph(ctx: &ServiceContext, source: &GraphSource) -> Result<String, AuditError> {
    let bytes = match source {
        GraphSource::File(path) => {
            if !ctx.fs.exists(path) {
                return Err(AuditError::NotFound { path: path.clone() });
            }
            ctx.fs.read(path).map_err(|source| AuditError::Io {
                path: path.clone(),
                source,
            })?
        }
        GraphSource::Stdin => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes).map_err(|e| AuditError::Io {
                path: PathBuf::from("<stdin>"),
                source: e.into(),
            })?;
            bytes
        }
        GraphSource::Command(command) => {
            let output = ctx.shell.run(command).map_err(|e| AuditError::Command {
                command: command.clone(),
                code: None,
                stderr: e.to_string(),
            })?;
            if !output.success() {
                return Err(AuditError::Command {
                    command: command.clone(),
                    code: output.exit_code,
                    stderr: output.stderr.trim().to_string(),
                });
            }
            output.stdout
        }
    };
    decode_utf8(bytes)
        .map_err(|line| AuditError::parse(format!("line {line}"), "graph input is not valid UTF-8"))
}
