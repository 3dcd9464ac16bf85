//! Ownership checks and clearing for destination roots.
//!
//! A destination root is only ever cleared when it is empty or carries the
//! [`MARKER_FILE`]. Anything else belongs to someone else and is left alone
//! unless the caller explicitly forces a takeover.

use crate::error::SyncError;
use crate::lock::TargetLock;
use crate::Result;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reserved file proving that a destination root is managed by skillport.
pub const MARKER_FILE: &str = ".managed_by_skillport";

/// Content written into [`MARKER_FILE`].
pub const MARKER_CONTENT: &str = "managed=true\n";

/// Ownership classification of a destination root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    /// The root does not exist yet.
    Missing,
    /// The root exists and has no entries.
    Empty,
    /// The root carries the ownership marker.
    Managed,
    /// The root has entries but no marker, or is not a directory.
    Foreign,
}

impl TargetState {
    /// Returns a stable label for this state.
    pub fn label(&self) -> &'static str {
        match self {
            TargetState::Missing => "missing",
            TargetState::Empty => "empty",
            TargetState::Managed => "managed",
            TargetState::Foreign => "foreign",
        }
    }

    /// True when the guard may clear the root without `force`.
    pub fn is_writable(&self) -> bool {
        !matches!(self, TargetState::Foreign)
    }
}

/// A prepared destination: cleared, marked and locked until dropped.
#[derive(Debug)]
pub struct PreparedTarget {
    /// State of the root before it was cleared.
    pub previous: TargetState,
    lock: TargetLock,
}

impl PreparedTarget {
    /// The destination root.
    pub fn root(&self) -> &Path {
        self.lock.root()
    }
}

/// Classifies a destination root without modifying it.
pub fn inspect(root: &Path) -> Result<TargetState> {
    let meta = match fs::metadata(root) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TargetState::Missing),
        Err(e) => return Err(SyncError::target_io(root, e)),
    };
    if !meta.is_dir() {
        return Ok(TargetState::Foreign);
    }

    let mut has_marker = false;
    let mut has_other = false;
    for entry in fs::read_dir(root).map_err(|e| SyncError::target_io(root, e))? {
        let entry = entry.map_err(|e| SyncError::target_io(root, e))?;
        if is_marker(&entry) {
            has_marker = true;
        } else {
            has_other = true;
        }
    }

    Ok(match (has_marker, has_other) {
        (true, _) => TargetState::Managed,
        (false, false) => TargetState::Empty,
        (false, true) => TargetState::Foreign,
    })
}

/// Makes `root` ready to receive a fresh set of skills.
///
/// Creates the root if needed, takes its advisory lock, refuses a foreign root
/// unless `force` is set, removes every entry except the marker and finally
/// (re)writes the marker. Re-running on a managed root converges to the same
/// state.
pub fn prepare(root: &Path, force: bool) -> Result<PreparedTarget> {
    refuse_non_directory(root)?;
    let created = !root.exists();
    fs::create_dir_all(root).map_err(|e| SyncError::target_io(root, e))?;
    let lock = TargetLock::acquire(root)?;

    let state = check(root, force)?;
    let previous = if created && state == TargetState::Empty {
        TargetState::Missing
    } else {
        state
    };
    clear_unmarked(root)?;
    fs::write(root.join(MARKER_FILE), MARKER_CONTENT)
        .map_err(|e| SyncError::target_io(root.join(MARKER_FILE), e))?;

    tracing::debug!(target = %root.display(), previous = previous.label(), "target prepared");
    Ok(PreparedTarget { previous, lock })
}

/// Read-only version of the refusal rules [`prepare`] applies.
///
/// Returns the current state when the root may be written, otherwise
/// [`SyncError::UnmanagedTargetConflict`]. A path that exists but is not a
/// directory is refused even with `force`.
pub fn check(root: &Path, force: bool) -> Result<TargetState> {
    refuse_non_directory(root)?;
    let state = inspect(root)?;
    if !state.is_writable() {
        if !force {
            return Err(SyncError::UnmanagedTargetConflict {
                path: root.to_path_buf(),
            });
        }
        tracing::warn!(
            target = %root.display(),
            "forcing takeover of a target with unmanaged files"
        );
    }
    Ok(state)
}

fn refuse_non_directory(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if !meta.is_dir() => Err(SyncError::UnmanagedTargetConflict {
            path: root.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

fn is_marker(entry: &fs::DirEntry) -> bool {
    entry.file_name() == MARKER_FILE && entry.file_type().is_ok_and(|t| t.is_file())
}

fn clear_unmarked(root: &Path) -> Result<()> {
    let entries: Vec<PathBuf> = fs::read_dir(root)
        .map_err(|e| SyncError::target_io(root, e))?
        .filter_map(|entry| match entry {
            Ok(entry) if is_marker(&entry) => None,
            Ok(entry) => Some(Ok(entry.path())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => Some(Err(SyncError::target_io(root, e))),
        })
        .collect::<Result<_>>()?;

    for path in entries {
        remove_entry(&path).map_err(|e| SyncError::target_io(&path, e))?;
    }
    Ok(())
}

/// Removes a file, symlink or directory tree. Symlinks are unlinked, never
/// followed; entries that already vanished are fine.
fn remove_entry(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        remove_file_or_link(path)
    };
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(windows)]
fn remove_file_or_link(path: &Path) -> io::Result<()> {
    // Directory symlinks on windows are removed as directories.
    fs::remove_file(path).or_else(|_| fs::remove_dir(path))
}

#[cfg(not(windows))]
fn remove_file_or_link(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}
