//! Changelog command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use gitscribe_changelog::ChangelogGenerator;

use super::Workspace;
use crate::cli::{output, Cli, OutputFormat};

/// Add new commits to the Unreleased section of the changelog
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Print the new sections without touching the changelog
    #[arg(short, long)]
    pub preview: bool,

    /// Changelog file (defaults to the configured file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(preview = self.preview, output = ?self.output, "executing changelog command");
        let workspace = Workspace::open()?;

        let mut generator =
            ChangelogGenerator::new(workspace.config.changelog.clone(), workspace.repo.path());
        if let Some(path) = &self.output {
            generator = generator.with_path(workspace.cwd.join(path));
        }

        let result = generator.generate(&workspace.repo, self.preview)?;

        match cli.format {
            OutputFormat::Json => output::json(&serde_json::json!({
                "updated": result.is_some() && !self.preview,
                "preview": self.preview,
                "path": generator.path().to_string_lossy(),
                "content": result,
            }))?,
            OutputFormat::Text => match result {
                None => {
                    if !cli.quiet {
                        output::info("No new changelog entries since the last update");
                    }
                }
                Some(content) if self.preview => println!("{}", content),
                Some(content) => {
                    if cli.verbose {
                        println!("{}", content);
                    }
                    if !cli.quiet {
                        output::success(&format!(
                            "Changelog updated at {}",
                            style(generator.path().display()).cyan()
                        ));
                    }
                }
            },
        }

        Ok(())
    }
}
