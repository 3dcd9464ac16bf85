//! Sync orchestrator that resolves the source and drives every target.

use crate::error::SyncError;
use crate::guard::{self, TargetState};
use crate::materialize::{self, MaterializeMode};
use crate::paths;
use crate::report::{SyncReport, TargetReport};
use crate::Result;
use serde::{Deserialize, Serialize};
use skillport_discovery::{discover_skills, select_source_root, SkillEntry};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default destination root for Codex.
pub const DEFAULT_CODEX_TARGET: &str = "~/.codex/skills/obsidian-vault";
/// Default destination root for Claude.
pub const DEFAULT_CLAUDE_TARGET: &str = "~/.claude/skills/obsidian-vault";
/// Default preferred skill folder inside the vault.
pub const DEFAULT_SOURCE_FOLDER: &str = "skills";

/// An external tool whose skill directory is a sync target.
///
/// Declaration order is processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetAgent {
    /// Codex CLI (primary target).
    Codex,
    /// Claude Code (secondary target).
    Claude,
}

impl TargetAgent {
    /// Every agent, in processing order.
    pub const ALL: [TargetAgent; 2] = [TargetAgent::Codex, TargetAgent::Claude];

    /// Agent identifier (e.g., "claude", "codex")
    pub fn label(&self) -> &'static str {
        match self {
            TargetAgent::Codex => "codex",
            TargetAgent::Claude => "claude",
        }
    }
}

impl fmt::Display for TargetAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which agents a sync covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentSelection {
    /// Codex only.
    Codex,
    /// Claude only.
    Claude,
    /// Codex, then Claude.
    #[default]
    Both,
}

impl AgentSelection {
    /// Selected agents in processing order.
    pub fn agents(&self) -> Vec<TargetAgent> {
        match self {
            AgentSelection::Codex => vec![TargetAgent::Codex],
            AgentSelection::Claude => vec![TargetAgent::Claude],
            AgentSelection::Both => TargetAgent::ALL.to_vec(),
        }
    }
}

impl FromStr for AgentSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "codex" => Ok(AgentSelection::Codex),
            "claude" => Ok(AgentSelection::Claude),
            "both" | "all" => Ok(AgentSelection::Both),
            other => Err(format!(
                "unknown agent '{other}' (expected codex, claude or both)"
            )),
        }
    }
}

/// Everything a sync invocation needs, supplied by the caller.
///
/// ```
/// use skillport_sync::{MaterializeMode, SyncConfig};
///
/// let config = SyncConfig { dry_run: true, ..Default::default() };
/// assert_eq!(config.source_folder, "skills");
/// assert_eq!(config.mode, MaterializeMode::Copy);
/// assert!(!config.force);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Vault the skills live in; `None` when the host could not supply one.
    pub vault_path: Option<String>,
    /// Preferred skill folder inside the vault.
    pub source_folder: String,
    /// Destination root for Codex (may use `~/`).
    pub codex_target: String,
    /// Destination root for Claude (may use `~/`).
    pub claude_target: String,
    /// Copy or link.
    #[serde(default)]
    pub mode: MaterializeMode,
    /// Take over destinations holding unmanaged files.
    #[serde(default)]
    pub force: bool,
    /// Inspect and report without writing.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            vault_path: None,
            source_folder: DEFAULT_SOURCE_FOLDER.to_string(),
            codex_target: DEFAULT_CODEX_TARGET.to_string(),
            claude_target: DEFAULT_CLAUDE_TARGET.to_string(),
            mode: MaterializeMode::Copy,
            force: false,
            dry_run: false,
        }
    }
}

impl SyncConfig {
    /// Configured (unresolved) destination for `agent`.
    pub fn target_path(&self, agent: TargetAgent) -> &str {
        match agent {
            TargetAgent::Codex => &self.codex_target,
            TargetAgent::Claude => &self.claude_target,
        }
    }
}

/// Resolved source and the skills found in it.
#[derive(Debug, Clone)]
pub struct SkillSet {
    /// Resolved vault path.
    pub vault: PathBuf,
    /// Selected source root.
    pub source: PathBuf,
    /// Discovered skills, sorted by name.
    pub skills: Vec<SkillEntry>,
}

/// Read-only view of one configured target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetStatus {
    /// Agent the target belongs to.
    pub agent: TargetAgent,
    /// Resolved destination root.
    pub target: PathBuf,
    /// Current ownership state.
    pub state: TargetState,
}

/// Orchestrates discovery, guarding and materialization for a set of targets.
pub struct SyncOrchestrator {
    config: SyncConfig,
}

impl SyncOrchestrator {
    /// Creates a new orchestrator for one configuration.
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Resolves the vault path, failing with [`SyncError::BaseUnavailable`] when absent.
    pub fn vault(&self) -> Result<PathBuf> {
        self.config
            .vault_path
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(paths::resolve)
            .ok_or(SyncError::BaseUnavailable)
    }

    /// Selects the source root and discovers its skills.
    pub fn locate(&self) -> Result<SkillSet> {
        let vault = self.vault()?;
        let source = select_source_root(&vault, &self.config.source_folder)?;
        let skills = discover_skills(&source)?;
        tracing::debug!(
            source = %source.display(),
            count = skills.len(),
            "discovered skills"
        );
        Ok(SkillSet {
            vault,
            source,
            skills,
        })
    }

    /// Reports the ownership state of each requested target without touching it.
    pub fn status(&self, agents: &[TargetAgent]) -> Result<Vec<TargetStatus>> {
        dedup_agents(agents)
            .into_iter()
            .map(|agent| {
                let target = paths::resolve(self.config.target_path(agent));
                let state = guard::inspect(&target)?;
                Ok(TargetStatus {
                    agent,
                    target,
                    state,
                })
            })
            .collect()
    }

    /// Performs the sync for `agents`, in order.
    ///
    /// Fails fast: the first failing target aborts the rest, and targets already
    /// processed stay as they were left.
    pub fn sync(&self, agents: &[TargetAgent]) -> Result<SyncReport> {
        let set = self.locate()?;
        let mut report = SyncReport {
            vault: set.vault.clone(),
            source: set.source.clone(),
            skills_found: set.skills.len(),
            dry_run: self.config.dry_run,
            targets: Vec::new(),
        };

        for agent in dedup_agents(agents) {
            let target = paths::resolve(self.config.target_path(agent));
            let outcome = if self.config.dry_run {
                self.plan_target(agent, &target, &set.skills)?
            } else {
                self.sync_target(agent, &target, &set.skills)?
            };
            report.targets.push(outcome);
        }
        Ok(report)
    }

    fn sync_target(
        &self,
        agent: TargetAgent,
        target: &Path,
        skills: &[SkillEntry],
    ) -> Result<TargetReport> {
        let prepared = guard::prepare(target, self.config.force)?;
        let mut placed = Vec::with_capacity(skills.len());
        for skill in skills {
            materialize::place(skill, prepared.root(), self.config.mode)?;
            placed.push(skill.name.clone());
        }

        tracing::info!(
            agent = agent.label(),
            target = %target.display(),
            mode = %self.config.mode,
            count = placed.len(),
            "synced target"
        );
        Ok(TargetReport {
            agent,
            target: target.to_path_buf(),
            mode: self.config.mode,
            state: prepared.previous,
            count: placed.len(),
            skills: placed,
        })
    }

    fn plan_target(
        &self,
        agent: TargetAgent,
        target: &Path,
        skills: &[SkillEntry],
    ) -> Result<TargetReport> {
        let state = guard::check(target, self.config.force)?;
        let names: Vec<String> = skills.iter().map(|s| s.name.clone()).collect();
        tracing::info!(
            agent = agent.label(),
            target = %target.display(),
            state = state.label(),
            count = names.len(),
            "dry run: target would be synced"
        );
        Ok(TargetReport {
            agent,
            target: target.to_path_buf(),
            mode: self.config.mode,
            state,
            count: names.len(),
            skills: names,
        })
    }
}

fn dedup_agents(agents: &[TargetAgent]) -> Vec<TargetAgent> {
    let mut out = Vec::with_capacity(agents.len());
    for agent in agents {
        if !out.contains(agent) {
            out.push(*agent);
        }
    }
    out
}
