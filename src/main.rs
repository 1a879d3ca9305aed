//! Binary entrypoint for the `dupcheck` CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use dupcheck::error::AuditError;

fn main() -> ExitCode {
    match load_dotenv().and_then(|()| dupcheck::run(std::env::args_os())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match &err {
                AuditError::Usage(message) => eprint!("{message}"),
                _ => eprintln!("error: {err}"),
            }
            ExitCode::from(err.exit_code())
        }
    }
}

/// Loads `.env` if one exists. A malformed file is an error, since its
/// `DUPCHECK_*` settings would otherwise be ignored.
fn load_dotenv() -> Result<(), AuditError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(AuditError::Config {
            path: PathBuf::from(".env"),
            message: err.to_string(),
        }),
    }
}
