use anyhow::Result;
use std::path::PathBuf;

/// Vault path the skills are read from.
pub const ENV_VAULT_PATH: &str = "SKILLPORT_VAULT_PATH";
/// Preferred skill folder inside the vault.
pub const ENV_SOURCE_FOLDER: &str = "SKILLPORT_SOURCE_FOLDER";
/// Which agents to sync: `codex`, `claude` or `both`.
pub const ENV_AGENT: &str = "SKILLPORT_AGENT";
/// Materialization mode: `copy` or `link`.
pub const ENV_MODE: &str = "SKILLPORT_MODE";
/// Destination root for Codex.
pub const ENV_CODEX_TARGET: &str = "SKILLPORT_CODEX_TARGET";
/// Destination root for Claude.
pub const ENV_CLAUDE_TARGET: &str = "SKILLPORT_CLAUDE_TARGET";
/// Overrides the config file location.
pub const ENV_CONFIG: &str = "SKILLPORT_CONFIG";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns the path to the config file.
///
/// `SKILLPORT_CONFIG` wins; otherwise `~/.skillport/config.toml`.
pub fn config_file() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var(ENV_CONFIG) {
        if !custom.is_empty() {
            return Some(PathBuf::from(custom));
        }
    }
    home_dir()
        .ok()
        .map(|h| h.join(".skillport").join("config.toml"))
}
