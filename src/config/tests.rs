use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_default_settings() {
    let settings = GuardConfig::load().unwrap().settings().unwrap();
    assert_eq!(settings.root, PathBuf::from("include"));
    assert_eq!(settings.extension, ".hpp");
    assert!(settings.exclude.is_empty());
    assert!(settings.atomic_write);
}

#[test]
fn test_custom_toml_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        "guards.toml",
        "root = \"headers\"\nextension = \".h\"\nexclude = [\"vendor/**\"]\n",
    );

    let settings = GuardConfig::load_with(Some(&path), None)
        .unwrap()
        .settings()
        .unwrap();
    assert_eq!(settings.root, PathBuf::from("headers"));
    assert_eq!(settings.extension, ".h");
    assert_eq!(settings.exclude, vec!["vendor/**".to_string()]);
    // Untouched keys keep their defaults
    assert!(settings.atomic_write);
}

#[test]
fn test_custom_yaml_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "guards.yaml", "extension: .hh\natomic_write: false\n");

    let settings = GuardConfig::load_with(Some(&path), None)
        .unwrap()
        .settings()
        .unwrap();
    assert_eq!(settings.extension, ".hh");
    assert!(!settings.atomic_write);
    assert_eq!(settings.root, PathBuf::from("include"));
}

#[test]
fn test_cli_overrides_beat_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "guards.toml", "root = \"headers\"\n");
    let overrides = SettingsOverrides {
        root: Some(PathBuf::from("src/public")),
        extension: None,
        exclude: vec!["*_impl.hpp".to_string()],
    };

    let settings = GuardConfig::load_with(Some(&path), Some(&overrides))
        .unwrap()
        .settings()
        .unwrap();
    assert_eq!(settings.root, PathBuf::from("src/public"));
    assert_eq!(settings.extension, ".hpp");
    assert_eq!(settings.exclude, vec!["*_impl.hpp".to_string()]);
}

#[test]
fn test_empty_extension_is_rejected() {
    let overrides = SettingsOverrides {
        extension: Some(String::new()),
        ..Default::default()
    };
    let config = GuardConfig::load_with(None, Some(&overrides)).unwrap();
    assert!(config.settings().is_err());
}

#[test]
fn test_invalid_exclude_glob_is_rejected() {
    let settings = GuardSettings {
        exclude: vec!["[unclosed".to_string()],
        ..Default::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn test_exclude_set_matches_relative_paths() {
    let settings = GuardSettings {
        exclude: vec!["detail/**".to_string()],
        ..Default::default()
    };
    let set = settings.exclude_set().unwrap();
    assert!(set.is_match("detail/image.hpp"));
    assert!(!set.is_match("human.hpp"));
}
