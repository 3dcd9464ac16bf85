//! Advisory per-destination lock.
//!
//! On unix the destination directory handle itself is locked, so the
//! destination keeps holding only the marker and the skills. Elsewhere a
//! sibling `<root>.skillport.lock` file is locked instead and removed again
//! when the lock is released.

use crate::error::SyncError;
use crate::Result;
use fs2::FileExt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Held for as long as one sync owns a destination root.
#[derive(Debug)]
pub struct TargetLock {
    file: File,
    root: PathBuf,
    #[cfg(not(unix))]
    lock_path: PathBuf,
}

impl TargetLock {
    /// Takes the lock without waiting. The destination root must already exist.
    pub fn acquire(root: &Path) -> Result<Self> {
        let file = open_lock_handle(root).map_err(|e| SyncError::target_io(root, e))?;
        match FileExt::try_lock_exclusive(&file) {
            Ok(()) => {
                tracing::debug!(target = %root.display(), "acquired target lock");
                Ok(Self {
                    file,
                    root: root.to_path_buf(),
                    #[cfg(not(unix))]
                    lock_path: sibling_lock_path(root),
                })
            }
            Err(e) if is_contended(&e) => Err(SyncError::TargetLocked {
                path: root.to_path_buf(),
            }),
            Err(e) => Err(SyncError::target_io(root, e)),
        }
    }

    /// The destination root this lock protects.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for TargetLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(target = %self.root.display(), error = %e, "failed to release target lock");
        }
        #[cfg(not(unix))]
        match std::fs::remove_file(&self.lock_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.lock_path.display(), error = %e, "lock file left in place");
            }
            _ => {}
        }
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

#[cfg(unix)]
fn open_lock_handle(root: &Path) -> io::Result<File> {
    File::open(root)
}

#[cfg(not(unix))]
fn open_lock_handle(root: &Path) -> io::Result<File> {
    std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(sibling_lock_path(root))
}

#[cfg(not(unix))]
fn sibling_lock_path(root: &Path) -> PathBuf {
    let mut name = root.as_os_str().to_os_string();
    name.push(".skillport.lock");
    PathBuf::from(name)
}
