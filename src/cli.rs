//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::graph::GraphFormat;

/// Top-level CLI parser for `dupcheck`.
///
/// Exit status is 0 when the duplicate set matches the baseline, 1 when it
/// drifted, and 2 for any other failure.
#[derive(Debug, Parser)]
#[command(
    name = "dupcheck",
    version,
    about = "Fail the build when duplicated dependencies drift from an approved baseline"
)]
pub struct Cli {
    /// Baseline file of approved duplicates [default: duplicates.txt].
    #[arg(long, env = "DUPCHECK_BASELINE", value_name = "PATH")]
    pub baseline: Option<PathBuf>,

    /// Read the dependency graph from a file instead of running a command
    /// (`-` reads standard input).
    #[arg(long, value_name = "FILE", conflicts_with = "command")]
    pub input: Option<PathBuf>,

    /// Shell command that prints the dependency graph
    /// [default: cargo tree --workspace --prefix none].
    #[arg(long, value_name = "CMD")]
    pub command: Option<String>,

    /// Format of the dependency graph [default: tree].
    #[arg(long, value_enum)]
    pub format: Option<GraphFormat>,

    /// Config file [default: dupcheck.yaml, if present].
    #[arg(long, env = "DUPCHECK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the current duplicate set in baseline format and exit.
    #[arg(long)]
    pub print_current: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_without_arguments() {
        let cli = Cli::try_parse_from(["dupcheck"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.command.is_none());
        assert!(!cli.print_current);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_input_and_format() {
        let cli = Cli::parse_from([
            "dupcheck",
            "--input",
            "Cargo.lock",
            "--format",
            "lock",
            "--baseline",
            "ci/duplicates.txt",
            "-vv",
        ]);
        assert_eq!(cli.input, Some(PathBuf::from("Cargo.lock")));
        assert_eq!(cli.format, Some(GraphFormat::Lock));
        assert_eq!(cli.baseline, Some(PathBuf::from("ci/duplicates.txt")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn input_conflicts_with_command() {
        let result =
            Cli::try_parse_from(["dupcheck", "--input", "tree.txt", "--command", "cargo tree"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["dupcheck", "--format", "dot"]).is_err());
    }
}
