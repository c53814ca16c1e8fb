//! CLI commands

mod changelog;
mod commit;
mod init;
mod status;

pub use changelog::ChangelogCommand;
pub use commit::CommitCommand;
pub use init::InitCommand;
pub use status::StatusCommand;

use std::path::PathBuf;

use gitscribe_core::config::{load_config_or_default, Config};
use gitscribe_git::GitRepo;

/// Config, repository and working directory shared by the git-facing commands
pub(crate) struct Workspace {
    pub cwd: PathBuf,
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub repo: GitRepo,
}

impl Workspace {
    /// Load config from the working directory and discover its repository
    pub fn open() -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd)?;
        let repo = GitRepo::discover(&cwd)?;

        Ok(Self {
            cwd,
            config,
            config_path,
            repo,
        })
    }
}
