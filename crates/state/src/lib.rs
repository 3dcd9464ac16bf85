//! Manages environment and configuration for skillport.
//!
//! This crate provides utilities for:
//! - Resolving the user's home directory.
//! - Reading `SKILLPORT_*` environment variables.
//! - Loading `config.toml` and folding it into the environment.

pub mod config;
pub mod env;

pub use config::{
    apply_config_to_env, apply_sync_config_to_env, load_config, load_config_from, Config,
    SyncFileConfig,
};
pub use env::{
    config_file, home_dir, ENV_AGENT, ENV_CLAUDE_TARGET, ENV_CODEX_TARGET,
    ENV_CONFIG, ENV_MODE, ENV_SOURCE_FOLDER, ENV_VAULT_PATH,
};
