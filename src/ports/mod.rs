//! Port traits defining external boundaries.
//!
//! The audit touches the outside world in two places: reading files
//! (baseline, config, graph input) and running the command that prints the
//! dependency graph. Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod shell;

pub use filesystem::FileSystem;
pub use shell::{ShellExecutor, ShellOutput};
