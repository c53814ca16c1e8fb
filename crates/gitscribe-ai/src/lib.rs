//! gitscribe AI - commit messages from an external AI CLI
//!
//! The AI is any command that reads a prompt on stdin and prints a reply.
//! [`CliGenerator`] runs it under a timeout; [`suggest_message`] builds the
//! prompt from the staged changes and normalises the reply into a
//! conventional commit header. [`fallback_message`] covers the case where no
//! AI is available.

mod message;
mod prompt;
mod provider;

pub use message::{fallback_message, normalize_message, suggest_message};
pub use prompt::{build_prompt, truncate_diff, TRUNCATION_MARKER};
pub use provider::{CliGenerator, MessageGenerator};

/// Result type for AI operations
pub type Result<T> = std::result::Result<T, gitscribe_core::error::AiError>;
