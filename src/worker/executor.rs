use std::process::Stdio;

use tokio::process::Command;

use crate::graph::JobId;

/// Result of running one job's command to completion.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub job: JobId,
    pub name: String,
    pub exit_code: Option<i32>,
    pub error: Option<String>,
}

impl CommandOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a single job command as a `sh -c` child process and captures its
/// exit status.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner;

impl CommandRunner {
    /// Execute `command`, blocking until the child exits. Never retries;
    /// a command that hangs stalls its batch indefinitely.
    pub async fn execute(&self, job: JobId, name: &str, command: &str) -> CommandOutcome {
        tracing::debug!(job = %job, name, command, "Executing job");

        let result = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(output) => {
                let exit_code = output.status.code();
                let error = if output.status.success() {
                    None
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
                    Some(if stderr.is_empty() {
                        format!("exit code: {:?}", exit_code)
                    } else {
                        stderr
                    })
                };

                if let Some(ref err) = error {
                    tracing::error!(job = %job, name, exit_code = ?exit_code, error = %err, "Job failed");
                } else {
                    tracing::debug!(job = %job, name, "Job completed");
                }

                CommandOutcome {
                    job,
                    name: name.to_string(),
                    exit_code,
                    error,
                }
            }
            Err(e) => {
                tracing::error!(job = %job, name, error = %e, "Failed to spawn job");
                CommandOutcome {
                    job,
                    name: name.to_string(),
                    exit_code: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
