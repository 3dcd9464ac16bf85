use crate::types::{DiscoveryError, SkillEntry, SkillKind, SKILL_FOLDER_KEYWORDS, SKILL_MANIFEST};
use crate::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns true if the name starts with a dot (hidden file/directory).
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

fn is_markdown_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

fn has_manifest(dir: &Path) -> bool {
    dir.join(SKILL_MANIFEST).is_file()
}

/// Picks the directory skills are read from, given a vault path.
///
/// A vault whose own folder name is `skill` or `skills` (any case) is the
/// source itself. Otherwise the preferred folder, `skill` and `skills` are
/// probed in that order, skipping case-insensitive duplicates, and the first
/// existing directory wins.
///
/// ```
/// use skillport_discovery::select_source_root;
/// use tempfile::tempdir;
///
/// let vault = tempdir().unwrap();
/// std::fs::create_dir(vault.path().join("skills")).unwrap();
///
/// let source = select_source_root(vault.path(), "agents").unwrap();
/// assert_eq!(source, vault.path().join("skills"));
/// ```
pub fn select_source_root(vault: &Path, preferred_folder: &str) -> Result<PathBuf> {
    let vault_name = vault
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if SKILL_FOLDER_KEYWORDS.contains(&vault_name.as_str()) {
        tracing::debug!(vault = %vault.display(), "vault folder is itself a skill source");
        return Ok(vault.to_path_buf());
    }

    let candidates = source_candidates(preferred_folder);
    let mut checked = Vec::with_capacity(candidates.len());
    for name in candidates {
        let candidate = vault.join(&name);
        if candidate.is_dir() {
            tracing::debug!(source = %candidate.display(), "selected skill source");
            return Ok(candidate);
        }
        checked.push(candidate);
    }

    Err(DiscoveryError::NoSkillSourceFound {
        vault: vault.to_path_buf(),
        checked,
    })
}

/// Candidate folder names in probe order, deduplicated case-insensitively.
fn source_candidates(preferred_folder: &str) -> Vec<String> {
    let preferred = preferred_folder.trim();
    let mut seen = HashSet::new();
    std::iter::once(preferred)
        .chain(SKILL_FOLDER_KEYWORDS)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(str::to_owned)
        .collect()
}

/// Scans the direct children of `source_root` for skills.
///
/// Recognition rules:
/// - a directory holding a `SKILL.md` is a [`SkillKind::Directory`] skill named after the directory;
/// - a regular file with a `.md` extension (any case) is a [`SkillKind::File`] skill named after its stem;
/// - names starting with `.` are invisible;
/// - when nothing qualifies but the root itself holds `SKILL.md`, the whole root is one
///   directory skill named after the root folder.
///
/// A `SKILL.md` lying directly in the root is never treated as a file skill; it only
/// feeds the root fallback. The result is sorted by name, case-sensitively.
pub fn discover(source_root: &Path) -> Result<Vec<SkillEntry>> {
    if !source_root.is_dir() {
        return Err(DiscoveryError::SourceUnavailable {
            path: source_root.to_path_buf(),
        });
    }

    let io_err = |source| DiscoveryError::Io {
        path: source_root.to_path_buf(),
        source,
    };

    let mut directories = Vec::new();
    let mut files = Vec::new();
    for entry in fs::read_dir(source_root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::warn!(path = %path.display(), "skipping non UTF-8 entry name");
            continue;
        };
        if is_hidden_name(&name) {
            continue;
        }

        if path.is_dir() {
            if has_manifest(&path) {
                tracing::debug!(skill = %name, "found directory skill");
                directories.push(SkillEntry {
                    name,
                    source_path: path,
                    kind: SkillKind::Directory,
                });
            }
        } else if name != SKILL_MANIFEST && is_markdown_file(&path) {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            tracing::debug!(skill = %stem, "found file skill");
            files.push(SkillEntry {
                name: stem.to_owned(),
                source_path: path.clone(),
                kind: SkillKind::File,
            });
        }
    }

    // A directory and a file can share a name (`a/` and `a.md`); the directory wins.
    let dir_names: HashSet<String> = directories.iter().map(|s| s.name.clone()).collect();
    files.retain(|file| {
        let clash = dir_names.contains(&file.name);
        if clash {
            tracing::warn!(
                skill = %file.name,
                path = %file.source_path.display(),
                "file skill shadowed by directory skill of the same name"
            );
        }
        !clash
    });

    let mut skills = directories;
    skills.extend(files);

    if skills.is_empty() && has_manifest(source_root) {
        let name = source_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_root.display().to_string());
        tracing::debug!(skill = %name, "using source root as a single skill");
        skills.push(SkillEntry {
            name,
            source_path: source_root.to_path_buf(),
            kind: SkillKind::Directory,
        });
    }

    skills.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(skills)
}

/// Runs [`discover`] and fails with [`DiscoveryError::NoSkillsFound`] on an empty result.
pub fn discover_skills(source_root: &Path) -> Result<Vec<SkillEntry>> {
    let skills = discover(source_root)?;
    if skills.is_empty() {
        return Err(DiscoveryError::NoSkillsFound {
            source_root: source_root.to_path_buf(),
        });
    }
    Ok(skills)
}
