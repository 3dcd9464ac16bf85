//! Failure taxonomy for a sync invocation.

use skillport_discovery::DiscoveryError;
use std::io;
use std::path::PathBuf;

/// Errors that end a sync invocation.
///
/// None of these are retried; each carries the path or skill name needed to fix
/// the underlying condition by hand.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SyncError {
    /// No vault path was supplied by the caller.
    #[error("vault path unavailable: set --vault-path, SKILLPORT_VAULT_PATH or [sync].vault_path")]
    BaseUnavailable,

    /// Source selection or discovery failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The destination is non-empty and carries no ownership marker.
    #[error(
        "target {} contains files not managed by skillport; refusing to modify it (empty it or pass --force)",
        path.display()
    )]
    UnmanagedTargetConflict {
        /// The destination root that was left untouched.
        path: PathBuf,
    },

    /// Another sync holds the advisory lock for this destination.
    #[error("target {} is locked by another sync", path.display())]
    TargetLocked {
        /// The locked destination root.
        path: PathBuf,
    },

    /// Creating, listing or clearing the destination failed.
    #[error("failed to prepare target {}: {source}", path.display())]
    TargetIo {
        /// The destination root or entry being touched.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Copying or linking a skill failed.
    #[error("failed to materialize skill '{skill}': {source}")]
    MaterializationFailed {
        /// Skill name.
        skill: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Link mode was requested where symbolic links cannot be created.
    #[error("link mode unsupported for skill '{skill}': {reason}")]
    UnsupportedLinkMode {
        /// Skill name.
        skill: String,
        /// Platform or filesystem explanation.
        reason: String,
    },
}

impl SyncError {
    pub(crate) fn target_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::TargetIo {
            path: path.into(),
            source,
        }
    }
}
