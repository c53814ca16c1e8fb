//! External AI command runner

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use gitscribe_core::config::AiConfig;
use gitscribe_core::error::AiError;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::Result;

/// Something that turns a prompt into text
#[async_trait::async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Name shown in logs and errors
    fn name(&self) -> &str;

    /// Run the prompt and return the raw response
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Runs an AI CLI binary with the prompt on stdin and reads stdout
#[derive(Debug, Clone)]
pub struct CliGenerator {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CliGenerator {
    /// Create a runner for `command` with `args`, with a 60 second timeout
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            timeout: Duration::from_secs(60),
        }
    }

    /// Create a runner from the `ai` config section
    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }

    /// Set the time budget for one run
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether the binary can be found
    pub fn is_available(&self) -> bool {
        self.resolve().is_ok()
    }

    fn resolve(&self) -> Result<PathBuf> {
        which::which(&self.command).map_err(|_| AiError::BinaryNotFound(self.command.clone()))
    }

    fn spawn_failed(&self, e: std::io::Error) -> AiError {
        AiError::SpawnFailed {
            command: self.command.clone(),
            reason: e.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl MessageGenerator for CliGenerator {
    fn name(&self) -> &str {
        &self.command
    }

    #[instrument(skip(self, prompt), fields(command = %self.command, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let program = self.resolve()?;
        debug!(program = %program.display(), args = ?self.args, "Spawning AI command");

        let mut child = Command::new(&program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_failed(e))?;

        let stdin = child.stdin.take();
        let run = async move {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(prompt.as_bytes()).await {
                    Ok(()) => {}
                    // the command exited without reading everything
                    Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                    Err(e) => return Err(e),
                }
            }
            child.wait_with_output().await
        };

        let output = match timeout(self.timeout, run).await {
            Ok(result) => result.map_err(|e| self.spawn_failed(e))?,
            Err(_) => {
                return Err(AiError::Timeout {
                    command: self.command.clone(),
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(AiError::Failed {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if stdout.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }

        debug!(response_len = stdout.len(), "AI command finished");
        Ok(stdout)
    }
}
