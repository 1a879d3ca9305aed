//! Shell executor port for running the dependency graph command.

/// The output of a shell command execution.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// The exit code of the process, if it exited normally.
    pub exit_code: Option<i32>,
    /// The captured standard output, undecoded.
    pub stdout: Vec<u8>,
    /// The captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` if the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Executes shell commands.
pub trait ShellExecutor: Send + Sync {
    /// Runs a command string in the system shell and returns its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>>;
}
