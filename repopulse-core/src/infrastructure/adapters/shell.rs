// repopulse-core/src/infrastructure/adapters/shell.rs

use crate::error::RepoPulseError;
use crate::ports::runner::{CommandOutput, CommandRunner};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Real shell adapter for the CommandRunner port.
///
/// Commands are full pipelines (`git shortlog -sn --all | wc -l`), so they
/// go through `sh -c` rather than argv splitting. Every failure mode,
/// including the wall-clock timeout, is reported as a failed
/// `CommandOutput` so the collector can keep going.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(
        &self,
        name: &str,
        command: &str,
        working_dir: &Path,
        timeout: Duration,
    ) -> Result<CommandOutput, RepoPulseError> {
        let execution = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(working_dir)
            .output();

        match tokio::time::timeout(timeout, execution).await {
            Err(_) => Ok(CommandOutput::failed(
                name,
                format!("Command timed out after {} seconds", timeout.as_secs()),
            )),
            Ok(Err(e)) => Ok(CommandOutput::failed(name, format!("Failed to spawn: {}", e))),
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                Ok(CommandOutput {
                    name: name.to_string(),
                    success: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                    stderr: if stderr.is_empty() { None } else { Some(stderr) },
                })
            }
        }
    }
}
