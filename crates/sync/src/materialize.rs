//! Reproduces discovered skills under a destination root.
//!
//! Both modes produce the same top-level shape: `<root>/<name>/SKILL.md`.
//! Copy mode duplicates the content; link mode references it.

use crate::error::SyncError;
use crate::Result;
use serde::{Deserialize, Serialize};
use skillport_discovery::{SkillEntry, SkillKind, SKILL_MANIFEST};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

/// How skills are reproduced at a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterializeMode {
    /// Recursive copy of the skill content.
    #[default]
    Copy,
    /// Symbolic link back to the source.
    Link,
}

impl MaterializeMode {
    /// Returns a stable label for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            MaterializeMode::Copy => "copy",
            MaterializeMode::Link => "link",
        }
    }
}

impl fmt::Display for MaterializeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MaterializeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copy" => Ok(MaterializeMode::Copy),
            "link" | "symlink" => Ok(MaterializeMode::Link),
            other => Err(format!("unknown mode '{other}' (expected copy or link)")),
        }
    }
}

/// Places one skill under `root` and returns the created entry.
///
/// Failures carry the skill name. Nothing is rolled back: a later successful
/// sync clears whatever a failed one left behind.
pub fn place(skill: &SkillEntry, root: &Path, mode: MaterializeMode) -> Result<PathBuf> {
    let dest = root.join(&skill.name);
    match mode {
        MaterializeMode::Copy => copy_skill(skill, &dest).map_err(|e| failed(skill, e))?,
        MaterializeMode::Link => link_skill(skill, &dest)?,
    }
    tracing::debug!(
        skill = %skill.name,
        kind = %skill.kind,
        mode = %mode,
        dest = %dest.display(),
        "materialized skill"
    );
    Ok(dest)
}

fn failed(skill: &SkillEntry, source: io::Error) -> SyncError {
    SyncError::MaterializationFailed {
        skill: skill.name.clone(),
        source,
    }
}

fn copy_skill(skill: &SkillEntry, dest: &Path) -> io::Result<()> {
    match skill.kind {
        SkillKind::Directory => copy_tree(&skill.source_path, dest),
        SkillKind::File => {
            fs::create_dir_all(dest)?;
            fs::copy(&skill.source_path, dest.join(SKILL_MANIFEST))?;
            Ok(())
        }
    }
}

/// Copies directories and regular files from `src` into `dest`; other entry
/// types are skipped. Symlinks inside the skill are followed.
fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dest.join(rel);
        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)?;
        } else {
            tracing::debug!(path = %entry.path().display(), "skipping special file");
        }
    }
    Ok(())
}

/// Maps a link-creation failure; link mode never falls back to copying.
fn link_error(skill: &SkillEntry, err: io::Error) -> SyncError {
    if is_link_unsupported(&err) {
        SyncError::UnsupportedLinkMode {
            skill: skill.name.clone(),
            reason: err.to_string(),
        }
    } else {
        failed(skill, err)
    }
}

fn link_skill(skill: &SkillEntry, dest: &Path) -> Result<()> {
    let link_err = |e: io::Error| link_error(skill, e);

    match skill.kind {
        SkillKind::Directory => symlink_dir(&skill.source_path, dest).map_err(link_err),
        SkillKind::File => {
            fs::create_dir_all(dest).map_err(|e| failed(skill, e))?;
            symlink_file(&skill.source_path, &dest.join(SKILL_MANIFEST)).map_err(link_err)
        }
    }
}

#[cfg(windows)]
const ERROR_PRIVILEGE_NOT_HELD: i32 = 1314;

fn is_link_unsupported(err: &io::Error) -> bool {
    #[cfg(windows)]
    if err.raw_os_error() == Some(ERROR_PRIVILEGE_NOT_HELD) {
        return true;
    }
    err.kind() == io::ErrorKind::Unsupported
}

#[cfg(unix)]
fn symlink_dir(src: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dest)
}

#[cfg(unix)]
fn symlink_file(src: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dest)
}

#[cfg(windows)]
fn symlink_dir(src: &Path, dest: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dest)
}

#[cfg(windows)]
fn symlink_file(src: &Path, dest: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dest)
}

#[cfg(not(any(unix, windows)))]
fn symlink_dir(_src: &Path, _dest: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not available on this platform",
    ))
}

#[cfg(not(any(unix, windows)))]
fn symlink_file(src: &Path, dest: &Path) -> io::Result<()> {
    symlink_dir(src, dest)
}
