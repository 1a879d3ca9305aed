//! In-memory port fakes shared by unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::{ShellExecutor, ShellOutput};

/// In-memory filesystem for testing without touching disk.
#[derive(Default)]
pub struct MemFs {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemFs {
    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.with_bytes(path, contents.as_bytes())
    }

    pub fn with_bytes(mut self, path: &str, contents: &[u8]) -> Self {
        self.files.insert(PathBuf::from(path), contents.to_vec());
        self
    }
}

impl FileSystem for MemFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(String::from_utf8(self.read(path)?)?)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// Shell fake that answers every command with the same output.
pub struct FakeShell {
    output: ShellOutput,
}

impl FakeShell {
    pub fn succeeding(stdout: &str) -> Self {
        Self::printing(stdout.as_bytes())
    }

    pub fn printing(stdout: &[u8]) -> Self {
        Self {
            output: ShellOutput {
                exit_code: Some(0),
                stdout: stdout.to_vec(),
                stderr: String::new(),
            },
        }
    }

    pub fn exiting(code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            output: ShellOutput {
                exit_code: Some(code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.to_string(),
            },
        }
    }
}

impl ShellExecutor for FakeShell {
    fn run(&self, _command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.output.clone())
    }
}

/// Context over `fs` with a shell that prints nothing.
pub fn context(fs: MemFs) -> ServiceContext {
    ServiceContext::new(Box::new(fs), Box::new(FakeShell::succeeding("")))
}
