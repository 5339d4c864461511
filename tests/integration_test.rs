// tests/integration_test.rs
use git2::Repository;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const MANIFEST: &str = "[package]\nname = \"demo\"\nversion = \"1.4.2\"\nedition = \"2021\"\n";
const LOCK: &str = "version = 3\n\n[[package]]\nname = \"demo\"\nversion = \"1.4.2\"\n";

fn release_bump(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_release-bump"))
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("npm_config_major")
        .env_remove("npm_config_minor")
        .env_remove("npm_config_patch")
        .env_remove("npm_config_dry_run")
        .env_remove("RUST_LOG")
        .env_remove("CLICOLOR_FORCE")
        .output()
        .expect("Failed to execute command")
}

// Helper function to setup a temporary git repo with a committed Cargo project
fn setup_test_repo() -> TempDir {
    setup_repo_with(&[("Cargo.toml", MANIFEST), ("Cargo.lock", LOCK)])
}

// Temporary git repo whose initial commit holds exactly `files`
fn setup_repo_with(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    let mut index = repo.index().expect("Could not get index");
    for (name, content) in files {
        fs::write(temp_dir.path().join(name), content).expect("Could not write file");
        index
            .add_path(Path::new(name))
            .expect("Could not add file to index");
    }
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let signature = repo.signature().expect("Could not get sig");
    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        "Initial commit",
        &tree,
        &[],
    )
    .expect("Could not create commit");

    temp_dir
}

#[test]
fn test_release_bump_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_release-bump"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("release-bump"));
    assert!(stdout.contains("--major"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_release_bump_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_release-bump"))
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_bump_kind_exits_with_error() {
    let temp_dir = setup_test_repo();
    let output = release_bump(temp_dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--major"), "stderr: {}", stderr);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("Cargo.toml")).unwrap(),
        MANIFEST
    );
}

#[test]
fn test_conflicting_bump_flags_are_usage_error() {
    let temp_dir = setup_test_repo();
    let output = release_bump(temp_dir.path(), &["--major", "--minor"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_dry_run_leaves_repository_untouched() {
    let temp_dir = setup_test_repo();
    let output = release_bump(temp_dir.path(), &["--minor", "--dry-run"]);

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[dry-run] bump: 1.4.2 -> 1.5.0"), "stdout: {}", stdout);
    assert!(stdout.contains("[dry-run] git tag v1.5.0"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("Cargo.toml")).unwrap(),
        MANIFEST
    );
    let repo = Repository::open(temp_dir.path()).unwrap();
    assert!(repo.find_reference("refs/tags/v1.5.0").is_err());
}

#[test]
fn test_dry_run_from_environment() {
    let temp_dir = setup_test_repo();
    let output = Command::new(env!("CARGO_BIN_EXE_release-bump"))
        .arg("-C")
        .arg(temp_dir.path())
        .env_remove("npm_config_minor")
        .env_remove("npm_config_patch")
        .env("npm_config_major", "true")
        .env("npm_config_dry_run", "true")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[dry-run] bump: 1.4.2 -> 2.0.0"), "stdout: {}", stdout);
}

#[test]
fn test_release_without_push_commits_and_tags() {
    let temp_dir = setup_test_repo();
    let output = release_bump(temp_dir.path(), &["--patch", "--no-push"]);

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("Cargo.toml")).unwrap(),
        MANIFEST.replace("1.4.2", "1.4.3")
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("Cargo.lock")).unwrap(),
        LOCK.replace("1.4.2", "1.4.3")
    );

    let repo = Repository::open(temp_dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("chore(release): v1.4.3"));

    let tag_target = repo
        .find_reference("refs/tags/v1.4.3")
        .expect("tag should exist")
        .peel_to_commit()
        .unwrap();
    assert_eq!(tag_target.id(), head.id());

    let statuses = repo.statuses(None).unwrap();
    assert!(statuses.is_empty(), "release commit should leave a clean tree");
}

#[test]
fn test_dirty_tree_aborts_release() {
    let temp_dir = setup_test_repo();
    fs::write(temp_dir.path().join("notes.txt"), "wip\n").unwrap();

    let output = release_bump(temp_dir.path(), &["--patch", "--no-push"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("Cargo.toml")).unwrap(),
        MANIFEST
    );
}

#[test]
fn test_missing_lock_warning_is_printed_once() {
    let temp_dir = setup_repo_with(&[("Cargo.toml", MANIFEST)]);
    let output = release_bump(temp_dir.path(), &["--patch", "--dry-run"]);

    assert!(output.status.success(), "{:?}", output);
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(
        stderr.matches("not found, skipping").count(),
        1,
        "stderr: {}",
        stderr
    );
    assert!(!stderr.contains('\x1b'), "piped stderr should be plain: {}", stderr);
}

#[test]
fn test_existing_tag_aborts_before_commit() {
    let temp_dir = setup_test_repo();
    {
        let repo = Repository::open(temp_dir.path()).unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.tag_lightweight("v1.4.3", head.as_object(), false)
            .expect("Could not create tag");
    }

    let output = release_bump(temp_dir.path(), &["--patch", "--no-push"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("v1.4.3"), "stderr: {}", stderr);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("Cargo.toml")).unwrap(),
        MANIFEST
    );
    let repo = Repository::open(temp_dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("Initial commit"));
}
