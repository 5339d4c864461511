// tests/config_test.rs
use release_bump::config::{load_config, Config, CONFIG_FILE_NAME};
use release_bump::domain::Version;
use release_bump::ReleaseError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.manifest, PathBuf::from("Cargo.toml"));
    assert_eq!(config.lock_file, PathBuf::from("Cargo.lock"));
    assert_eq!(config.remote, "origin");
    assert_eq!(config.tag_pattern, "v{version}");
    assert_eq!(config.commit_message, "chore(release): v{version}");
    assert!(config.push);
    assert_eq!(config.package_name, None);
    assert_eq!(config.target.section, "package");
    assert_eq!(config.target.key, "version");
    assert_eq!(config.lock.block_marker, "[[package]]");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
remote = "upstream"
tag_pattern = "rel-{version}"

[lock]
name_key = "id"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let root = TempDir::new().unwrap();
    let config = load_config(Some(temp_file.path()), root.path()).unwrap();
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.tag_pattern, "rel-{version}");
    assert_eq!(config.lock.name_key, "id");
    // Unset values keep their defaults
    assert_eq!(config.lock.version_key, "version");
    assert_eq!(config.commit_message, "chore(release): v{version}");
}

#[test]
fn test_load_fixture_config() {
    let root = TempDir::new().unwrap();
    let config = load_config(Some(fixture("release-bump.toml").as_path()), root.path()).unwrap();

    assert_eq!(config.remote, "upstream");
    assert!(!config.push);
    assert_eq!(config.package_name.as_deref(), Some("freeagent"));
    assert_eq!(config.target.section, "workspace.package");

    let version = Version::new(2, 0, 0);
    assert_eq!(config.tag_pattern().unwrap().format(&version), "release-2.0.0");
    assert_eq!(config.commit_pattern().unwrap().format(&version), "Release 2.0.0");
}

#[test]
fn test_project_root_config_is_discovered() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(CONFIG_FILE_NAME), "remote = \"mirror\"\n").unwrap();

    let config = load_config(None, root.path()).unwrap();
    assert_eq!(config.remote, "mirror");
}

#[test]
fn test_explicit_path_beats_project_root() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(CONFIG_FILE_NAME), "remote = \"mirror\"\n").unwrap();

    let config = load_config(Some(fixture("release-bump.toml").as_path()), root.path()).unwrap();
    assert_eq!(config.remote, "upstream");
}

#[test]
fn test_missing_explicit_config_is_error() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope.toml");
    assert!(matches!(
        load_config(Some(missing.as_path()), root.path()),
        Err(ReleaseError::Io(_))
    ));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"remote = [unterminated").unwrap();
    temp_file.flush().unwrap();

    let root = TempDir::new().unwrap();
    assert!(matches!(
        load_config(Some(temp_file.path()), root.path()),
        Err(ReleaseError::ConfigParse(_))
    ));
}

#[test]
fn test_pattern_without_placeholder_is_rejected_on_load() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"tag_pattern = \"stable\"\n").unwrap();
    temp_file.flush().unwrap();

    let root = TempDir::new().unwrap();
    assert!(matches!(
        load_config(Some(temp_file.path()), root.path()),
        Err(ReleaseError::Config(_))
    ));
}
