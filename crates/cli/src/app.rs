use crate::cli::{Cli, Commands, SourceArgs, TargetArgs};
use anyhow::{Context, Result};
use clap::Parser;
use skillport_sync::{MaterializeMode, SyncConfig, SyncOrchestrator};

/// Parses the command line and runs the selected command.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    skillport_state::apply_config_to_env().context("failed to apply skillport config")?;
    let cli = Cli::parse();
    tracing::debug!(target: "skillport::cli", command = ?cli.command, "parsed command line");

    match cli.command {
        Commands::Sync {
            source,
            targets,
            mode,
            force,
            dry_run,
        } => handle_sync_command(source, targets, mode, force, dry_run),
        Commands::List { source } => handle_list_command(source),
        Commands::Status { targets } => handle_status_command(targets),
    }
}

fn sync_config(source: Option<SourceArgs>, targets: Option<TargetArgs>) -> SyncConfig {
    let mut config = SyncConfig::default();
    if let Some(source) = source {
        config.vault_path = source.vault_path;
        config.source_folder = source.source_folder;
    }
    if let Some(targets) = targets {
        config.codex_target = targets.codex_target;
        config.claude_target = targets.claude_target;
    }
    config
}

fn handle_sync_command(
    source: SourceArgs,
    targets: TargetArgs,
    mode: MaterializeMode,
    force: bool,
    dry_run: bool,
) -> Result<()> {
    let agents = targets.agent.agents();
    tracing::debug!(target: "skillport::cli", ?agents, %mode, force, dry_run, "starting sync");
    let orchestrator = SyncOrchestrator::new(SyncConfig {
        mode,
        force,
        dry_run,
        ..sync_config(Some(source), Some(targets))
    });

    let report = orchestrator.sync(&agents)?;
    eprint!("{}", report.format_summary());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn handle_list_command(source: SourceArgs) -> Result<()> {
    let set = SyncOrchestrator::new(sync_config(Some(source), None)).locate()?;
    for skill in set.skills {
        println!(
            "{}\t{}\t{}",
            skill.name,
            skill.kind,
            skill.source_path.display()
        );
    }
    Ok(())
}

fn handle_status_command(targets: TargetArgs) -> Result<()> {
    let agents = targets.agent.agents();
    let orchestrator = SyncOrchestrator::new(sync_config(None, Some(targets)));
    for status in orchestrator.status(&agents)? {
        println!(
            "{}\t{}\t{}",
            status.agent,
            status.state.label(),
            status.target.display()
        );
    }
    Ok(())
}
