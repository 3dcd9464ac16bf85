//! Managed skill-directory sync for skillport.
//!
//! Publishes the skills found in a vault into each agent's skill directory,
//! either as copies or as symbolic links. A destination is only ever cleared
//! when it is empty, missing, or carries the ownership marker written by a
//! previous sync.
//!
//! # Examples
//!
//! ```
//! use skillport_sync::{SyncConfig, SyncOrchestrator, TargetAgent, MARKER_FILE};
//! use tempfile::tempdir;
//!
//! let temp = tempdir().unwrap();
//! let vault = temp.path().join("vault");
//! std::fs::create_dir_all(vault.join("skills/writing")).unwrap();
//! std::fs::write(vault.join("skills/writing/SKILL.md"), "# Writing").unwrap();
//! std::fs::write(vault.join("skills/research.md"), "# Research").unwrap();
//!
//! let target = temp.path().join("codex/skills/vault");
//! let orchestrator = SyncOrchestrator::new(SyncConfig {
//!     vault_path: Some(vault.display().to_string()),
//!     codex_target: target.display().to_string(),
//!     ..Default::default()
//! });
//!
//! let report = orchestrator.sync(&[TargetAgent::Codex]).unwrap();
//! assert_eq!(report.targets[0].skills, vec!["research", "writing"]);
//! assert!(target.join(MARKER_FILE).is_file());
//! assert!(target.join("research/SKILL.md").is_file());
//! ```

#![deny(unsafe_code)]

/// Error type for sync operations.
pub type Error = SyncError;
/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, Error>;

pub mod error;
pub mod guard;
pub mod lock;
pub mod materialize;
pub mod orchestrator;
pub mod paths;
pub mod report;

pub use error::SyncError;
pub use guard::{check, inspect, prepare, PreparedTarget, TargetState, MARKER_CONTENT, MARKER_FILE};
pub use lock::TargetLock;
pub use materialize::{place, MaterializeMode};
pub use orchestrator::{
    AgentSelection, SkillSet, SyncConfig, SyncOrchestrator, TargetAgent, TargetStatus,
    DEFAULT_CLAUDE_TARGET, DEFAULT_CODEX_TARGET, DEFAULT_SOURCE_FOLDER,
};
pub use report::{SyncReport, TargetReport};
