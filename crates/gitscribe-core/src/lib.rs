//! gitscribe Core - shared foundation for the gitscribe toolkit
//!
//! This crate provides the error taxonomy and the configuration system used by
//! the git, changelog, AI and CLI crates.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{AiError, ChangelogError, ConfigError, GitError, GitscribeError, Result};
