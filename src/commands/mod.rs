//! Command dispatch and handlers.

pub mod check;

use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::error::AuditError;

/// Dispatch a parsed command line to its handler.
///
/// # Errors
///
/// Returns the handler's error; drift is reported as [`AuditError::Drift`].
pub fn dispatch(cli: &Cli, ctx: &ServiceContext) -> Result<(), AuditError> {
    let settings = check::Settings::resolve(ctx, cli)?;
    if cli.print_current {
        check::print_current(ctx, &settings)
    } else {
        check::run(ctx, &settings)
    }
}
