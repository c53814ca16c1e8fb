//! Commit command

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::{info, warn};

use gitscribe_ai::{fallback_message, suggest_message, CliGenerator, MessageGenerator};

use super::Workspace;
use crate::cli::{output, Cli, OutputFormat};

/// Commit staged changes with an AI-written message
#[derive(Debug, Args)]
pub struct CommitCommand {
    /// Stage modified tracked files first
    #[arg(short, long)]
    pub all: bool,

    /// Print the message without committing
    #[arg(long)]
    pub dry_run: bool,

    /// Commit without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Paths to stage before generating the message
    pub paths: Vec<String>,
}

impl CommitCommand {
    /// Execute the commit command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(all = self.all, paths = ?self.paths, dry_run = self.dry_run, "executing commit command");
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let workspace = Workspace::open()?;
        let repo = &workspace.repo;
        let config = &workspace.config;

        if self.all {
            repo.stage_tracked_changes()?;
        }
        if !self.paths.is_empty() {
            let paths: Vec<&str> = self.paths.iter().map(String::as_str).collect();
            repo.stage_paths(&paths)?;
        }

        let changes = repo.staged_changes()?;
        if changes.is_empty() {
            anyhow::bail!("Nothing staged to commit. Stage files with `git add` or pass --all.");
        }

        let generator = CliGenerator::from_config(&config.ai);
        if !cli.quiet && cli.format == OutputFormat::Text {
            output::info(&format!(
                "Asking {} about {} staged file(s)",
                style(generator.name()).cyan(),
                changes.files.len()
            ));
        }

        let message = match suggest_message(&generator, &changes, config.ai.max_diff_chars).await {
            Ok(message) => message,
            Err(e) if config.commit.fallback_on_ai_failure => {
                warn!(error = %e, "AI message generation failed, using fallback");
                if !cli.quiet {
                    output::warning(&format!("{}; using a generated fallback message", e));
                }
                let paths: Vec<&str> = changes.paths().collect();
                fallback_message(&paths)
            }
            Err(e) => return Err(e.into()),
        };

        if self.dry_run {
            match cli.format {
                OutputFormat::Json => output::json(&serde_json::json!({
                    "message": message,
                    "committed": false,
                }))?,
                OutputFormat::Text => println!("{}", message),
            }
            return Ok(());
        }

        if config.commit.confirm && !self.yes {
            println!();
            println!("  {}", style(&message).bold());
            println!();

            let proceed = Confirm::new()
                .with_prompt("Commit with this message?")
                .default(true)
                .interact()?;

            if !proceed {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        let hash = repo.commit_staged(&message)?;
        info!(hash = %hash, "commit created");

        match cli.format {
            OutputFormat::Json => output::json(&serde_json::json!({
                "message": message,
                "committed": true,
                "hash": hash,
            }))?,
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success(&format!(
                        "Committed {} {}",
                        style(&hash[..7.min(hash.len())]).yellow(),
                        message
                    ));
                }
            }
        }

        Ok(())
    }
}
