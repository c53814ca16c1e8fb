//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_ai(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::GitscribeError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file.as_os_str().is_empty() {
        return Err(invalid("changelog.file", "path cannot be empty"));
    }

    if config.changelog.fallback_commit_count == 0 {
        return Err(invalid(
            "changelog.fallback_commit_count",
            "must be greater than zero",
        ));
    }

    Ok(())
}

fn validate_ai(config: &Config) -> Result<()> {
    if config.ai.command.trim().is_empty() {
        return Err(invalid("ai.command", "command cannot be empty"));
    }

    if config.ai.timeout_secs == 0 {
        return Err(invalid("ai.timeout_secs", "must be greater than zero"));
    }

    if config.ai.max_diff_chars == 0 {
        return Err(invalid("ai.max_diff_chars", "must be greater than zero"));
    }

    Ok(())
}
