//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "gitscribe.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "gitscribe.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".gitscribe.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".gitscribe.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# gitscribe configuration

changelog:
  file: CHANGELOG.md
  # Commits scanned when the changelog carries no CI-LAST-PROCESSED marker
  fallback_commit_count: 50
  min_entry_length: 10

ai:
  command: claude
  args: ["-p"]
  timeout_secs: 60
  max_diff_chars: 12000

commit:
  confirm: true
  fallback_on_ai_failure: true
"#;
