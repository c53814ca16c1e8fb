//! Error types for gitscribe

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias using GitscribeError
pub type Result<T> = std::result::Result<T, GitscribeError>;

/// Main error type for gitscribe operations
#[derive(Debug, Error)]
pub enum GitscribeError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// AI generation errors
    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// No commits found
    #[error("No commits found in repository")]
    NoCommits,

    /// A revision could not be resolved
    #[error("Unknown revision: {0}")]
    UnknownRevision(String),

    /// Nothing staged for commit
    #[error("No staged changes to commit")]
    NothingStaged,

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The commit-range or HEAD query failed
    #[error("Failed to query commits: {0}")]
    CommitQuery(#[from] GitError),

    /// Failed to read the existing document
    #[error("Failed to read changelog at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to persist the document
    #[error("Failed to write changelog at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the external AI text-generation process
#[derive(Debug, Error)]
pub enum AiError {
    /// Configured binary is not on PATH
    #[error("AI command not found: {0}")]
    BinaryNotFound(String),

    /// Process could not be started or awaited
    #[error("Failed to run AI command '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },

    /// Process exceeded its time budget
    #[error("AI command '{command}' timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// Process exited unsuccessfully
    #[error("AI command '{command}' failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Process produced nothing usable
    #[error("AI command returned an empty response")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changelog_error_wraps_git_error() {
        let err: ChangelogError = GitError::UnknownRevision("abc123".to_string()).into();
        assert!(err.to_string().contains("abc123"));

        let top: GitscribeError = err.into();
        assert!(matches!(top, GitscribeError::Changelog(_)));
    }

    #[test]
    fn test_timeout_message() {
        let err = AiError::Timeout {
            command: "claude".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "AI command 'claude' timed out after 5s");
    }
}
