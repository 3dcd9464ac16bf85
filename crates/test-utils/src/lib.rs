//! Shared test utilities for skillport crates.
//!
//! This crate provides common test fixtures and utilities used across
//! multiple crates in the skillport workspace.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = skillport_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is set to "value"
/// // When _guard drops, MY_VAR is restored to its original value
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Temporary vault plus a fake home directory for sync targets.
///
/// Layout:
/// - `<tmp>/vault/skills/`: the skill source folder
/// - `<tmp>/home/`: stands in for `$HOME`
///
/// Everything is removed when the fixture drops.
pub struct VaultFixture {
    pub tempdir: tempfile::TempDir,
    /// Path to `<tmp>/vault/skills`
    pub skills_dir: PathBuf,
    /// Path to `<tmp>/home`
    pub home: PathBuf,
}

impl VaultFixture {
    /// Creates the vault, its `skills` folder and an empty home directory.
    ///
    /// Does NOT set HOME; tests pass `home` to the child process or swap HOME themselves.
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let skills_dir = tempdir.path().join("vault/skills");
        let home = tempdir.path().join("home");

        std::fs::create_dir_all(&skills_dir)?;
        std::fs::create_dir_all(&home)?;

        Ok(Self {
            tempdir,
            skills_dir,
            home,
        })
    }

    /// Path to the vault root.
    pub fn vault_path(&self) -> &Path {
        self.skills_dir.parent().unwrap_or(self.tempdir.path())
    }

    /// Create a directory skill (`<name>/SKILL.md`) in the skills folder.
    ///
    /// Returns the path to the skill directory.
    pub fn create_skill(&self, name: &str, content: &str) -> std::io::Result<PathBuf> {
        let skill_dir = self.skills_dir.join(name);
        std::fs::create_dir_all(&skill_dir)?;
        std::fs::write(skill_dir.join("SKILL.md"), content)?;
        Ok(skill_dir)
    }

    /// Create a single-file skill (`<name>.md`) in the skills folder.
    pub fn create_file_skill(&self, name: &str, content: &str) -> std::io::Result<PathBuf> {
        let path = self.skills_dir.join(format!("{name}.md"));
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Add a supporting file inside an existing directory skill.
    pub fn add_support_file(
        &self,
        skill: &str,
        rel: &str,
        content: &str,
    ) -> std::io::Result<PathBuf> {
        let path = self.skills_dir.join(skill).join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// A destination root under the fake home (not created).
    pub fn target(&self, rel: &str) -> PathBuf {
        self.home.join(rel)
    }
}

/// Lists the direct entry names of `dir`, sorted.
pub fn entry_names(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = std::fs::read_dir(dir)?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
