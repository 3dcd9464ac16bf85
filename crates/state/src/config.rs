//! Configuration file support for skillport.
//!
//! Loads settings from `~/.skillport/config.toml` (or `SKILLPORT_CONFIG`)
//! with the following precedence:
//! CLI arguments > Environment variables > Config file
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.skillport/config.toml
//!
//! [sync]
//! # Vault whose skills are exported
//! vault_path = "~/Documents/Vault"
//!
//! # Preferred skill folder inside the vault
//! source_folder = "skills"
//!
//! # codex | claude | both
//! agent = "both"
//!
//! # copy | link
//! mode = "copy"
//!
//! # Destination roots
//! codex_target = "~/.codex/skills/obsidian-vault"
//! claude_target = "~/.claude/skills/obsidian-vault"
//! ```

use crate::env::{
    config_file, ENV_AGENT, ENV_CLAUDE_TARGET, ENV_CODEX_TARGET, ENV_MODE, ENV_SOURCE_FOLDER,
    ENV_VAULT_PATH,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration structure.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Sync command configuration.
    #[serde(default)]
    pub sync: SyncFileConfig,
}

/// Configuration for the sync command.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncFileConfig {
    /// Vault path (may use `~/`).
    pub vault_path: Option<String>,
    /// Preferred skill folder inside the vault.
    pub source_folder: Option<String>,
    /// Agent selection: `codex`, `claude` or `both`.
    pub agent: Option<String>,
    /// Materialization mode: `copy` or `link`.
    pub mode: Option<String>,
    /// Destination root for Codex.
    pub codex_target: Option<String>,
    /// Destination root for Claude.
    pub claude_target: Option<String>,
}

/// Loads the configuration file if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Ok(Some(config))` if the file exists and parses successfully.
/// Returns `Err` if the file exists but fails to parse.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = config_file() else {
        return Ok(None);
    };
    load_config_from(&path)
}

/// Loads a configuration file from an explicit path.
pub fn load_config_from(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    tracing::debug!(
        target: "skillport::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(Some(config))
}

/// Applies configuration file settings to environment variables.
///
/// Only sets environment variables that are not already set, preserving
/// the precedence: CLI > ENV > config file.
///
/// This should be called early in the application startup, before
/// parsing CLI arguments.
pub fn apply_config_to_env() -> Result<()> {
    if let Some(config) = load_config()? {
        apply_sync_config_to_env(&config.sync);
    }
    Ok(())
}

/// Applies sync configuration to environment variables.
pub fn apply_sync_config_to_env(sync: &SyncFileConfig) {
    fn set_if_absent(key: &str, value: &str) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
            tracing::trace!(
                target: "skillport::config",
                key,
                "Set environment variable from config file"
            );
        }
    }

    let pairs = [
        (ENV_VAULT_PATH, &sync.vault_path),
        (ENV_SOURCE_FOLDER, &sync.source_folder),
        (ENV_AGENT, &sync.agent),
        (ENV_MODE, &sync.mode),
        (ENV_CODEX_TARGET, &sync.codex_target),
        (ENV_CLAUDE_TARGET, &sync.claude_target),
    ];
    for (key, value) in pairs {
        if let Some(value) = value {
            set_if_absent(key, value);
        }
    }
}
