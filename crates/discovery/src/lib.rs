//! Discovery of skills inside a vault.
//!
//! This crate provides mechanisms for:
//! - Choosing which folder of a vault holds skills.
//! - Scanning that folder for directory skills (`<name>/SKILL.md`) and
//!   single-file skills (`<name>.md`).
//!
//! # Examples
//!
//! ```
//! use skillport_discovery::{discover_skills, SkillKind};
//! use tempfile::tempdir;
//!
//! let temp = tempdir().unwrap();
//! let skill_dir = temp.path().join("alpha");
//! std::fs::create_dir_all(&skill_dir).unwrap();
//! std::fs::write(skill_dir.join("SKILL.md"), "# Alpha").unwrap();
//! std::fs::write(temp.path().join("beta.md"), "# Beta").unwrap();
//!
//! let skills = discover_skills(temp.path()).unwrap();
//! assert_eq!(skills.len(), 2);
//! assert_eq!(skills[1].kind, SkillKind::File);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Error type for discovery operations.
pub type Error = DiscoveryError;
/// Result type for discovery operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Skill scanning and source selection.
pub mod scanner;
/// Skill entry and error types.
pub mod types;

pub use scanner::{discover, discover_skills, is_hidden_name, select_source_root};
pub use types::{DiscoveryError, SkillEntry, SkillKind, SKILL_FOLDER_KEYWORDS, SKILL_MANIFEST};
