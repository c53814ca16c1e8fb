//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::info;

use gitscribe_core::config::{
    validate_config, Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};

use crate::cli::{output, Cli};

/// Create a gitscribe configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Never prompt; fail if the file exists
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Write TOML instead of YAML
    #[arg(long)]
    pub toml: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, toml = self.toml, "executing init command");
        let config_path = self.target_path(&std::env::current_dir()?);

        if !self.may_write(&config_path)? {
            println!("{}", style("Aborted.").yellow());
            return Ok(());
        }

        write_template(&config_path, self.toml)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                style(config_path.display()).cyan()
            ));
            println!();
            println!("Next steps:");
            println!("  1. Point {} at your AI CLI if it is not `claude`", style("ai.command").cyan());
            println!("  2. Run {} to see what gitscribe sees", style("gitscribe status").cyan());
            println!("  3. Run {} to try it out", style("gitscribe changelog --preview").cyan());
        }

        Ok(())
    }

    fn target_path(&self, cwd: &Path) -> PathBuf {
        let default_name = if self.toml {
            DEFAULT_CONFIG_TOML
        } else {
            DEFAULT_CONFIG_YAML
        };
        self.output
            .as_ref()
            .map(|p| cwd.join(p))
            .unwrap_or_else(|| cwd.join(default_name))
    }

    /// Whether `path` may be (over)written. Only prompts when the file exists
    /// and neither `--force` nor `--yes` was given.
    fn may_write(&self, path: &Path) -> anyhow::Result<bool> {
        if !path.exists() || self.force {
            return Ok(true);
        }

        if self.yes {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }

        Ok(Confirm::new()
            .with_prompt(format!(
                "Configuration file already exists at {}. Overwrite?",
                path.display()
            ))
            .default(false)
            .interact()?)
    }
}

fn write_template(path: &Path, toml: bool) -> anyhow::Result<()> {
    std::fs::write(path, render_template(toml)?)?;
    Ok(())
}

/// Default configuration file content
fn render_template(toml: bool) -> anyhow::Result<String> {
    if !toml {
        return Ok(DEFAULT_CONFIG_TEMPLATE.to_string());
    }

    let config = Config::default();
    validate_config(&config)?;
    Ok(format!(
        "# gitscribe configuration\n\n{}",
        toml::to_string_pretty(&config)?
    ))
}
