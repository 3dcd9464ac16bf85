use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Canonical manifest filename that marks a directory as a skill.
pub const SKILL_MANIFEST: &str = "SKILL.md";

/// Folder names that identify a vault path as a skill source on its own.
pub const SKILL_FOLDER_KEYWORDS: [&str; 2] = ["skill", "skills"];

/// How a skill is laid out at its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    /// A directory containing a `SKILL.md` manifest plus optional siblings.
    Directory,
    /// A single markdown file that becomes the manifest at the destination.
    File,
}

impl SkillKind {
    /// Returns a stable label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            SkillKind::Directory => "directory",
            SkillKind::File => "file",
        }
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One unit of content to be synchronized.
///
/// Entries are produced fresh by every discovery run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillEntry {
    /// Skill name, unique within one discovery result.
    pub name: String,
    /// Absolute path to the skill directory or file.
    pub source_path: PathBuf,
    /// Layout of the skill at its source.
    pub kind: SkillKind,
}

/// Errors raised while locating and scanning a skill source.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The source root does not exist or is not a directory.
    #[error("skill source unavailable: {} is not a directory", path.display())]
    SourceUnavailable {
        /// The path that was expected to be a directory.
        path: PathBuf,
    },

    /// The source root was scanned but yielded no skills.
    #[error("no skills found in {}", source_root.display())]
    NoSkillsFound {
        /// The scanned source root.
        source_root: PathBuf,
    },

    /// None of the candidate source folders exist under the vault.
    #[error(
        "no skill source found under {}; checked: {}",
        vault.display(),
        checked.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    NoSkillSourceFound {
        /// The vault path that was probed.
        vault: PathBuf,
        /// Every candidate folder that was checked, in probe order.
        checked: Vec<PathBuf>,
    },

    /// Listing the source root failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_skill_source_message_lists_every_candidate() {
        let err = DiscoveryError::NoSkillSourceFound {
            vault: PathBuf::from("/vault"),
            checked: vec![
                PathBuf::from("/vault/agents"),
                PathBuf::from("/vault/skill"),
                PathBuf::from("/vault/skills"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("/vault/agents"));
        assert!(msg.contains("/vault/skill,"));
        assert!(msg.ends_with("/vault/skills"));
    }

    #[test]
    fn kind_labels_are_lowercase() {
        assert_eq!(SkillKind::Directory.to_string(), "directory");
        assert_eq!(SkillKind::File.label(), "file");
    }
}
