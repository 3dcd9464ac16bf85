//! Destination path resolution.
//!
//! Pure path manipulation: nothing here touches the filesystem, and malformed
//! input still yields a path that later steps validate.

use std::path::{Path, PathBuf};

/// Resolves a user-supplied path against the current user's home and working directory.
///
/// `~` and `~/rest` expand to the home directory, relative paths are joined onto the
/// current directory, absolute paths pass through unchanged.
pub fn resolve(raw: &str) -> PathBuf {
    let home = dirs::home_dir();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_with(raw, home.as_deref(), &cwd)
}

/// Resolves `raw` with an explicit home and working directory.
///
/// ```
/// use skillport_sync::paths::resolve_with;
/// use std::path::Path;
///
/// let home = Path::new("/home/ada");
/// let cwd = Path::new("/work");
/// assert_eq!(resolve_with("~/.codex/skills", Some(home), cwd), Path::new("/home/ada/.codex/skills"));
/// assert_eq!(resolve_with("out/skills", Some(home), cwd), Path::new("/work/out/skills"));
/// assert_eq!(resolve_with("/srv/skills", Some(home), cwd), Path::new("/srv/skills"));
/// ```
pub fn resolve_with(raw: &str, home: Option<&Path>, cwd: &Path) -> PathBuf {
    let expanded = shellexpand::tilde_with_context(raw, || home.and_then(Path::to_str));
    let path = PathBuf::from(expanded.as_ref());
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: absolute inputs are returned unchanged.
        #[test]
        fn absolute_paths_pass_through(segments in prop::collection::vec("[a-zA-Z0-9_.-]{1,12}", 1..5)) {
            let raw = format!("/{}", segments.join("/"));
            let resolved = resolve_with(&raw, Some(Path::new("/home/ada")), Path::new("/cwd"));
            prop_assert_eq!(resolved, PathBuf::from(&raw));
        }

        /// Property: `~/` inputs always land under the home directory.
        #[test]
        fn home_shorthand_lands_under_home(segments in prop::collection::vec("[a-zA-Z0-9_-]{1,12}", 1..5)) {
            let raw = format!("~/{}", segments.join("/"));
            let resolved = resolve_with(&raw, Some(Path::new("/home/ada")), Path::new("/cwd"));
            prop_assert!(resolved.starts_with("/home/ada"));
            prop_assert!(resolved.ends_with(segments.join("/")));
        }

        /// Property: the result is always absolute when the working directory is.
        #[test]
        fn result_is_absolute(raw in "[a-zA-Z0-9_~/.-]{0,24}") {
            let resolved = resolve_with(&raw, Some(Path::new("/home/ada")), Path::new("/cwd"));
            prop_assert!(resolved.is_absolute());
        }
    }
}
