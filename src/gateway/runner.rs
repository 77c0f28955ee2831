//! Child process execution with a deadline.
//!
//! # Responsibilities
//! - Spawn the client binary directly from a [`CommandSpec`]
//! - Capture stdout/stderr
//! - Enforce the per-invocation timeout and kill the child on expiry
//!
//! # Design Decisions
//! - Uses Tokio's process and timeout facilities
//! - Timeout errors are distinct from other errors
//! - The child is killed whenever its future is dropped (timeout or aborted request)

use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;

use crate::gateway::command::CommandSpec;
use crate::gateway::types::InvocationError;

/// Captured output of a successful (exit status 0) invocation.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

/// Seam between the gateway and the operating system.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `spec` to completion. A non-zero exit is an error.
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, InvocationError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, InvocationError> {
        let program = spec.program().to_string();
        let start = Instant::now();

        tracing::debug!(command = %spec.display(), "Spawning client process");

        let child = Command::new(spec.program())
            .args(spec.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| InvocationError::Spawn {
                program: program.clone(),
                source,
            })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => return Err(InvocationError::Io { program, source }),
            Err(_) => {
                tracing::warn!(
                    program = %program,
                    timeout_secs = self.timeout.as_secs(),
                    "Client process timed out, killing"
                );
                return Err(InvocationError::TimedOut {
                    program,
                    after: self.timeout,
                });
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        if !output.status.success() {
            return Err(InvocationError::Exit {
                program,
                code: output.status.code(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            // The client prints gas estimates and warnings here; the exit status decides.
            tracing::debug!(program = %program, stderr = %stderr, "Client wrote to stderr");
        }

        tracing::debug!(program = %program, elapsed_ms, "Client process finished");

        Ok(ProcessOutput {
            stdout: output.stdout,
            stderr,
        })
    }
}
