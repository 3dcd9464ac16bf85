//! Sync reporting types returned to the caller.

use crate::guard::TargetState;
use crate::materialize::MaterializeMode;
use crate::orchestrator::TargetAgent;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome for one destination root.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    /// Which agent this destination belongs to.
    pub agent: TargetAgent,
    /// Resolved destination root.
    pub target: PathBuf,
    /// Mode the skills were materialized with.
    pub mode: MaterializeMode,
    /// Ownership state of the root before this sync.
    pub state: TargetState,
    /// Skill names placed (or, on a dry run, that would be placed), in order.
    pub skills: Vec<String>,
    /// Number of skills placed.
    pub count: usize,
}

/// Aggregate outcome of one sync invocation.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Resolved vault path.
    pub vault: PathBuf,
    /// Source root the skills were read from.
    pub source: PathBuf,
    /// Number of skills discovered.
    pub skills_found: usize,
    /// True when nothing was written.
    pub dry_run: bool,
    /// Per-destination results, in processing order.
    pub targets: Vec<TargetReport>,
}

impl SyncReport {
    /// Returns total skills placed across all targets.
    pub fn total_placed(&self) -> usize {
        self.targets.iter().map(|t| t.count).sum()
    }

    /// Generates a formatted summary for display.
    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{}: {} skill(s) from {}\n",
            if self.dry_run { "Dry run" } else { "Sync complete" },
            self.skills_found,
            self.source.display()
        ));
        for target in &self.targets {
            out.push_str(&format!(
                "  {:<7} {} ({}, was {}): {}\n",
                target.agent.label(),
                target.target.display(),
                target.mode,
                target.state.label(),
                target.skills.join(", ")
            ));
        }
        out
    }
}
