use clap::{Args, Parser, Subcommand};
use skillport_sync::{
    AgentSelection, MaterializeMode, DEFAULT_CLAUDE_TARGET, DEFAULT_CODEX_TARGET,
    DEFAULT_SOURCE_FOLDER,
};

/// Command-line interface for the `skillport` application.
#[derive(Debug, Parser)]
#[command(
    name = "skillport",
    version,
    about = "Publishes vault skills into Codex and Claude skill directories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `skillport` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Syncs vault skills into the selected agent directories and prints a JSON report.
    Sync {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        targets: TargetArgs,
        /// Copy skill content or link back to the vault.
        #[arg(long, env = "SKILLPORT_MODE", default_value = "copy")]
        mode: MaterializeMode,
        /// Take over target directories that hold unmanaged files.
        #[arg(long, default_value_t = false)]
        force: bool,
        /// Report what would be synced without writing anything.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Lists the skills discovered in the vault.
    #[command(alias = "list-skills")]
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Shows whether each target directory is missing, empty, managed or foreign.
    Status {
        #[command(flatten)]
        targets: TargetArgs,
    },
}

/// Where skills are read from.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Vault holding the skill folder (may use `~/`).
    #[arg(long, env = "SKILLPORT_VAULT_PATH", value_name = "PATH")]
    pub vault_path: Option<String>,
    /// Preferred skill folder inside the vault.
    #[arg(
        long,
        env = "SKILLPORT_SOURCE_FOLDER",
        value_name = "NAME",
        default_value = DEFAULT_SOURCE_FOLDER
    )]
    pub source_folder: String,
}

/// Which agent directories are written.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Agents to sync: codex, claude or both.
    #[arg(long, env = "SKILLPORT_AGENT", default_value = "both")]
    pub agent: AgentSelection,
    /// Destination root for Codex.
    #[arg(
        long,
        env = "SKILLPORT_CODEX_TARGET",
        value_name = "DIR",
        default_value = DEFAULT_CODEX_TARGET
    )]
    pub codex_target: String,
    /// Destination root for Claude.
    #[arg(
        long,
        env = "SKILLPORT_CLAUDE_TARGET",
        value_name = "DIR",
        default_value = DEFAULT_CLAUDE_TARGET
    )]
    pub claude_target: String,
}
