//! Integration tests for Settings config loading.
//!
//! These tests run without a global config (temp directories only), so the
//! local file layers directly onto the compiled defaults.

use std::fs;

use tempfile::TempDir;

use rsnote::config::SettingsError;
use rsnote::{RenderSettings, Settings};

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let settings = Settings::load(None).expect("load settings");
    assert_eq!(settings.render, RenderSettings::default());
}

#[test]
fn given_missing_local_file_when_load_then_skipped() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(Some(dir.path().join("absent.toml").as_path())).expect("load settings");
    assert_eq!(settings.render, RenderSettings::default());
}

#[test]
fn given_local_config_with_label_when_load_then_label_replaced_marker_kept() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rsnote.toml");
    fs::write(
        &path,
        r#"
[render]
label = "REPLY"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    assert_eq!(settings.render.label, "REPLY");
    assert_eq!(settings.render.marker, "---");
}

#[test]
fn given_invalid_toml_when_load_then_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[render\nlabel = ").unwrap();

    let err = Settings::load(Some(path.as_path())).unwrap_err();

    assert!(matches!(err, SettingsError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_settings_when_round_tripping_through_file_then_equal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rsnote.toml");
    let settings = Settings {
        render: RenderSettings {
            marker: "**".into(),
            label: "ANSWER".into(),
        },
    };
    fs::write(&path, settings.to_toml().unwrap()).unwrap();

    assert_eq!(Settings::load(Some(path.as_path())).unwrap(), settings);
}
