//! End-to-end sync behavior against real temporary vaults and targets.

use skillport_discovery::DiscoveryError;
use skillport_sync::{
    MaterializeMode, SyncConfig, SyncError, SyncOrchestrator, TargetAgent, TargetState,
    MARKER_CONTENT, MARKER_FILE,
};
use skillport_test_utils::{entry_names, VaultFixture};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

struct SyncTestSetup {
    vault: VaultFixture,
    codex: PathBuf,
    claude: PathBuf,
}

impl SyncTestSetup {
    fn new() -> anyhow::Result<Self> {
        let vault = VaultFixture::new()?;
        let codex = vault.target(".codex/skills/obsidian-vault");
        let claude = vault.target(".claude/skills/obsidian-vault");
        Ok(Self {
            vault,
            codex,
            claude,
        })
    }

    /// Vault with one directory skill and one single-file skill.
    fn with_sample_skills() -> anyhow::Result<Self> {
        let setup = Self::new()?;
        setup.vault.create_skill("writing", "# Writing\n")?;
        setup
            .vault
            .add_support_file("writing", "refs/style.md", "Use short sentences.")?;
        setup.vault.create_file_skill("research", "# Research\n")?;
        Ok(setup)
    }

    fn config(&self, mode: MaterializeMode) -> SyncConfig {
        SyncConfig {
            vault_path: Some(self.vault.vault_path().display().to_string()),
            codex_target: self.codex.display().to_string(),
            claude_target: self.claude.display().to_string(),
            mode,
            ..Default::default()
        }
    }

    fn orchestrator(&self, mode: MaterializeMode) -> SyncOrchestrator {
        SyncOrchestrator::new(self.config(mode))
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn sync_reports_discovered_skills_for_each_target() {
    let setup = SyncTestSetup::with_sample_skills().unwrap();

    let report = setup
        .orchestrator(MaterializeMode::Copy)
        .sync(&TargetAgent::ALL)
        .unwrap();

    assert_eq!(report.vault, setup.vault.vault_path());
    assert_eq!(report.source, setup.vault.skills_dir);
    assert_eq!(report.skills_found, 2);
    assert_eq!(report.total_placed(), 4);
    for (target, root) in report.targets.iter().zip([&setup.codex, &setup.claude]) {
        assert_eq!(&target.target, root);
        assert_eq!(target.count, 2);
        assert_eq!(target.skills, vec!["research", "writing"]);
        assert_eq!(
            entry_names(root).unwrap(),
            vec![MARKER_FILE, "research", "writing"]
        );
        assert_eq!(read(&root.join(MARKER_FILE)), MARKER_CONTENT);
        assert_eq!(read(&root.join("research/SKILL.md")), "# Research\n");
        assert_eq!(
            read(&root.join("writing/refs/style.md")),
            "Use short sentences."
        );
    }
}

/// Every path under `root` with its file content (`None` for directories),
/// following links so copy and link trees are comparable.
fn snapshot(root: &Path) -> Vec<(PathBuf, Option<String>)> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let rel = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let content = entry.file_type().is_file().then(|| read(entry.path()));
            (rel, content)
        })
        .collect()
}

fn assert_idempotent(mode: MaterializeMode) {
    let setup = SyncTestSetup::with_sample_skills().unwrap();
    let orch = setup.orchestrator(mode);

    let first = orch.sync(&TargetAgent::ALL).unwrap();
    let before = [snapshot(&setup.codex), snapshot(&setup.claude)];
    let second = orch.sync(&TargetAgent::ALL).unwrap();

    for (a, b) in first.targets.iter().zip(&second.targets) {
        assert_eq!(a.skills, b.skills);
        assert_eq!(b.state, TargetState::Managed);
    }
    assert_eq!([snapshot(&setup.codex), snapshot(&setup.claude)], before);
    assert!(before[0].contains(&(
        PathBuf::from("writing/refs/style.md"),
        Some("Use short sentences.".to_string())
    )));
}

#[test]
fn second_sync_converges_to_the_same_tree() {
    assert_idempotent(MaterializeMode::Copy);
}

#[cfg(unix)]
#[test]
fn second_link_sync_converges_to_the_same_tree() {
    assert_idempotent(MaterializeMode::Link);
}

fn assert_removed_skill_disappears(mode: MaterializeMode) {
    let setup = SyncTestSetup::with_sample_skills().unwrap();
    let orch = setup.orchestrator(mode);
    orch.sync(&TargetAgent::ALL).unwrap();

    fs::remove_file(setup.vault.skills_dir.join("research.md")).unwrap();
    let report = orch.sync(&TargetAgent::ALL).unwrap();

    assert_eq!(report.targets.len(), 2);
    for (target, root) in report.targets.iter().zip([&setup.codex, &setup.claude]) {
        assert_eq!(target.skills, vec!["writing"]);
        assert_eq!(entry_names(root).unwrap(), vec![MARKER_FILE, "writing"]);
        assert!(fs::symlink_metadata(root.join("research")).is_err());
    }
}

#[test]
fn removed_skill_disappears_on_next_sync() {
    assert_removed_skill_disappears(MaterializeMode::Copy);
}

#[cfg(unix)]
#[test]
fn removed_file_skill_disappears_from_linked_targets() {
    assert_removed_skill_disappears(MaterializeMode::Link);
}

#[test]
fn unmanaged_target_is_left_byte_for_byte_untouched() {
    let setup = SyncTestSetup::with_sample_skills().unwrap();
    fs::create_dir_all(setup.codex.join("my-own-skill")).unwrap();
    fs::write(setup.codex.join("my-own-skill/SKILL.md"), "hand written").unwrap();
    fs::write(setup.codex.join("notes.txt"), "precious").unwrap();

    let err = setup
        .orchestrator(MaterializeMode::Copy)
        .sync(&TargetAgent::ALL)
        .unwrap_err();

    assert!(matches!(err, SyncError::UnmanagedTargetConflict { ref path } if *path == setup.codex));
    assert_eq!(
        entry_names(&setup.codex).unwrap(),
        vec!["my-own-skill", "notes.txt"]
    );
    assert_eq!(read(&setup.codex.join("my-own-skill/SKILL.md")), "hand written");
    assert_eq!(read(&setup.codex.join("notes.txt")), "precious");
    assert!(!setup.claude.exists(), "later targets must not be processed");
}

#[test]
fn earlier_targets_keep_their_sync_when_a_later_one_fails() {
    let setup = SyncTestSetup::with_sample_skills().unwrap();
    fs::create_dir_all(&setup.claude).unwrap();
    fs::write(setup.claude.join("notes.txt"), "precious").unwrap();

    let err = setup
        .orchestrator(MaterializeMode::Copy)
        .sync(&TargetAgent::ALL)
        .unwrap_err();

    assert!(matches!(err, SyncError::UnmanagedTargetConflict { .. }));
    assert_eq!(
        entry_names(&setup.codex).unwrap(),
        vec![MARKER_FILE, "research", "writing"]
    );
    assert_eq!(entry_names(&setup.claude).unwrap(), vec!["notes.txt"]);
}

#[test]
fn force_takes_over_unmanaged_target() {
    let setup = SyncTestSetup::with_sample_skills().unwrap();
    fs::create_dir_all(&setup.codex).unwrap();
    fs::write(setup.codex.join("notes.txt"), "stale").unwrap();

    let report = SyncOrchestrator::new(SyncConfig {
        force: true,
        ..setup.config(MaterializeMode::Copy)
    })
    .sync(&[TargetAgent::Codex])
    .unwrap();

    assert_eq!(report.targets[0].state, TargetState::Foreign);
    assert_eq!(
        entry_names(&setup.codex).unwrap(),
        vec![MARKER_FILE, "research", "writing"]
    );
}

#[test]
fn dry_run_reports_plan_without_writing() {
    let setup = SyncTestSetup::with_sample_skills().unwrap();
    let report = SyncOrchestrator::new(SyncConfig {
        dry_run: true,
        ..setup.config(MaterializeMode::Copy)
    })
    .sync(&TargetAgent::ALL)
    .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.targets.len(), 2);
    assert!(report
        .targets
        .iter()
        .all(|t| t.state == TargetState::Missing && t.count == 2));
    assert!(!setup.codex.exists());
    assert!(!setup.claude.exists());
}

#[test]
fn dry_run_still_refuses_unmanaged_target() {
    let setup = SyncTestSetup::with_sample_skills().unwrap();
    fs::create_dir_all(&setup.codex).unwrap();
    fs::write(setup.codex.join("notes.txt"), "precious").unwrap();

    let err = SyncOrchestrator::new(SyncConfig {
        dry_run: true,
        ..setup.config(MaterializeMode::Copy)
    })
    .sync(&TargetAgent::ALL)
    .unwrap_err();

    assert!(matches!(err, SyncError::UnmanagedTargetConflict { .. }));
}

#[test]
fn missing_vault_is_base_unavailable() {
    let setup = SyncTestSetup::with_sample_skills().unwrap();
    let err = SyncOrchestrator::new(SyncConfig {
        vault_path: None,
        ..setup.config(MaterializeMode::Copy)
    })
    .sync(&TargetAgent::ALL)
    .unwrap_err();

    assert!(matches!(err, SyncError::BaseUnavailable));
    assert!(!setup.codex.exists());
}

#[test]
fn vault_without_skill_folder_names_checked_candidates() {
    let setup = SyncTestSetup::new().unwrap();
    fs::remove_dir_all(&setup.vault.skills_dir).unwrap();
    fs::write(setup.vault.vault_path().join("note.md"), "# not a skill").unwrap();

    let mut config = setup.config(MaterializeMode::Copy);
    config.source_folder = "agent-skills".into();
    let err = SyncOrchestrator::new(config)
        .sync(&TargetAgent::ALL)
        .unwrap_err();

    match err {
        SyncError::Discovery(DiscoveryError::NoSkillSourceFound { checked, .. }) => {
            let names: Vec<_> = checked
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect();
            assert_eq!(names, vec!["agent-skills", "skill", "skills"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!setup.codex.exists());
}

#[test]
fn source_folder_holding_a_single_skill_is_synced_as_one() {
    let setup = SyncTestSetup::new().unwrap();
    fs::write(setup.vault.skills_dir.join("SKILL.md"), "# Whole folder").unwrap();
    fs::write(setup.vault.skills_dir.join("helper.txt"), "aux").unwrap();

    let report = setup
        .orchestrator(MaterializeMode::Copy)
        .sync(&[TargetAgent::Codex])
        .unwrap();

    assert_eq!(report.targets[0].skills, vec!["skills"]);
    assert_eq!(read(&setup.codex.join("skills/SKILL.md")), "# Whole folder");
    assert_eq!(read(&setup.codex.join("skills/helper.txt")), "aux");
}

#[cfg(unix)]
#[test]
fn copy_and_link_modes_produce_the_same_shape() {
    let setup = SyncTestSetup::with_sample_skills().unwrap();
    setup
        .orchestrator(MaterializeMode::Copy)
        .sync(&[TargetAgent::Codex])
        .unwrap();
    setup
        .orchestrator(MaterializeMode::Link)
        .sync(&[TargetAgent::Claude])
        .unwrap();

    assert_eq!(
        entry_names(&setup.codex).unwrap(),
        entry_names(&setup.claude).unwrap()
    );
    for name in ["research", "writing"] {
        let manifest = Path::new(name).join("SKILL.md");
        assert_eq!(
            read(&setup.codex.join(&manifest)),
            read(&setup.claude.join(&manifest))
        );
    }
    let linked = fs::symlink_metadata(setup.claude.join("writing")).unwrap();
    assert!(linked.file_type().is_symlink());
}

#[cfg(unix)]
#[test]
fn resync_over_links_never_touches_the_vault() {
    let setup = SyncTestSetup::with_sample_skills().unwrap();
    let orch = setup.orchestrator(MaterializeMode::Link);
    orch.sync(&[TargetAgent::Codex]).unwrap();
    orch.sync(&[TargetAgent::Codex]).unwrap();

    assert_eq!(
        read(&setup.vault.skills_dir.join("writing/SKILL.md")),
        "# Writing\n"
    );
    assert_eq!(
        read(&setup.vault.skills_dir.join("writing/refs/style.md")),
        "Use short sentences."
    );
    assert_eq!(
        read(&setup.vault.skills_dir.join("research.md")),
        "# Research\n"
    );
}
