// repopulse-core/src/ports/runner.rs

// What the core needs from the outside world to observe a repository:
// something that executes a named shell command and reports what happened.
// The core never learns whether that is a real shell, a sandbox or a mock.

use crate::error::RepoPulseError;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Outcome of one command execution. Failures are data, not errors: a
/// non-zero exit or a timeout comes back as `success: false` so the
/// collector can degrade instead of aborting the run.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub name: String,
    pub success: bool,
    pub stdout: String,
    pub stderr: Option<String>,
}

impl CommandOutput {
    pub fn failed(name: &str, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            stdout: String::new(),
            stderr: Some(reason.into()),
        }
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        name: &str,
        command: &str,
        working_dir: &Path,
        timeout: Duration,
    ) -> Result<CommandOutput, RepoPulseError>;
}
