//! Status command

use clap::Args;
use console::style;
use tracing::{info, warn};

use gitscribe_ai::CliGenerator;
use gitscribe_changelog::{last_processed, ChangelogGenerator, CommitRange, CommitSource};
use gitscribe_core::error::GitError;

use super::Workspace;
use crate::cli::{output, Cli, OutputFormat};

const LABEL_WIDTH: usize = 14;

/// Show repository and changelog status
#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    /// Execute the status command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing status command");
        let workspace = Workspace::open()?;
        let repo = &workspace.repo;

        let branch = repo.current_branch()?;
        let is_clean = repo.is_clean()?;
        let head = match repo.head_hash() {
            Ok(hash) => Some(hash),
            Err(GitError::NoCommits) => None,
            Err(e) => return Err(e.into()),
        };

        let generator = ChangelogGenerator::new(workspace.config.changelog.clone(), repo.path());
        let changelog_exists = generator.path().exists();
        let watermark = last_processed(generator.path())?;

        let range = match &watermark {
            Some(hash) => CommitRange::Since(hash.clone()),
            None => CommitRange::All,
        };
        let pending = match CommitSource::commits(repo, &range) {
            Ok(commits) => Some(commits.len()),
            Err(e) => {
                warn!(error = %e, "could not count pending commits");
                None
            }
        };

        let ai = CliGenerator::from_config(&workspace.config.ai);
        let ai_available = ai.is_available();

        match cli.format {
            OutputFormat::Json => output::json(&serde_json::json!({
                "config_path": workspace.config_path.as_ref().map(|p| p.to_string_lossy()),
                "git": {
                    "branch": branch,
                    "clean": is_clean,
                    "head": head,
                },
                "changelog": {
                    "path": generator.path().to_string_lossy(),
                    "exists": changelog_exists,
                    "last_processed": watermark,
                    "pending_commits": pending,
                },
                "ai": {
                    "command": workspace.config.ai.command,
                    "available": ai_available,
                },
            }))?,
            OutputFormat::Text => {
                println!("{}", style("gitscribe status").bold());
                println!();

                println!("{}", style("Configuration").underlined());
                match &workspace.config_path {
                    Some(path) => println!(
                        "{}",
                        output::key_value("Config file", style(path.display()).cyan(), LABEL_WIDTH)
                    ),
                    None => println!(
                        "{}",
                        output::key_value(
                            "Config file",
                            format!("{} (using defaults)", style("not found").yellow()),
                            LABEL_WIDTH
                        )
                    ),
                }
                println!();

                println!("{}", style("Git").underlined());
                let branch_label = match &branch {
                    Some(b) => style(b.clone()).green(),
                    None => style("detached".to_string()).yellow(),
                };
                println!("{}", output::key_value("Branch", branch_label, LABEL_WIDTH));
                let clean_label = if is_clean {
                    style("clean").green()
                } else {
                    style("dirty").red()
                };
                println!("{}", output::key_value("Status", clean_label, LABEL_WIDTH));
                let head_label = match &head {
                    Some(h) => style(short(h)).cyan(),
                    None => style("no commits".to_string()).dim(),
                };
                println!("{}", output::key_value("HEAD", head_label, LABEL_WIDTH));
                println!();

                println!("{}", style("Changelog").underlined());
                let path_label = if changelog_exists {
                    style(generator.path().display().to_string()).cyan()
                } else {
                    style(format!("{} (not created yet)", generator.path().display())).yellow()
                };
                println!("{}", output::key_value("File", path_label, LABEL_WIDTH));
                let watermark_label = match &watermark {
                    Some(h) => style(short(h)).cyan(),
                    None => style("none".to_string()).dim(),
                };
                println!("{}", output::key_value("Last processed", watermark_label, LABEL_WIDTH));
                let pending_label = match pending {
                    Some(0) => style("up to date".to_string()).green(),
                    Some(n) => style(n.to_string()).yellow(),
                    None => style("unknown".to_string()).red(),
                };
                println!("{}", output::key_value("Pending", pending_label, LABEL_WIDTH));
                println!();

                println!("{}", style("AI").underlined());
                let ai_label = if ai_available {
                    style(format!("{} (found)", workspace.config.ai.command)).green()
                } else {
                    style(format!("{} (not on PATH)", workspace.config.ai.command)).yellow()
                };
                println!("{}", output::key_value("Command", ai_label, LABEL_WIDTH));
            }
        }

        Ok(())
    }
}

fn short(hash: &str) -> String {
    hash.chars().take(7).collect()
}
