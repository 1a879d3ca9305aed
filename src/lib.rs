//! Core library entry for the `dupcheck` CLI.
//!
//! `dupcheck` audits a resolved dependency graph for packages pulled in at
//! more than one version and compares them against a committed baseline of
//! approved duplicates. The pipeline is:
//!
//! 1. [`graph::parse`] raw `cargo tree` / `Cargo.lock` / `cargo metadata` text;
//! 2. [`graph::extract`] the duplicate set;
//! 3. [`baseline::BaselineStore::load`] the approved set;
//! 4. [`diff::diff`] the two;
//! 5. [`report::render`] the result as a patch against the baseline.

pub mod adapters;
pub mod baseline;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod diff;
pub mod duplicates;
pub mod error;
pub mod graph;
pub mod logging;
pub mod ports;
pub mod report;

#[cfg(test)]
mod testing;

use clap::error::ErrorKind;
use clap::Parser;

use crate::context::ServiceContext;
use crate::error::AuditError;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns [`AuditError::Usage`] when argument parsing fails,
/// [`AuditError::Drift`] when the duplicate set drifted from the baseline,
/// and the corresponding error for any other failure.
pub fn run<I, T>(args: I) -> Result<(), AuditError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(AuditError::Usage(err.to_string())),
    };
    logging::init(cli.verbose);
    commands::dispatch(&cli, &ServiceContext::live())
}
