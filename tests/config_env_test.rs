//! Environment overrides live in their own test binary: `RSNOTE_*`
//! variables are process-wide and would leak into parallel config tests.

use std::fs;

use tempfile::TempDir;

use rsnote::Settings;

#[test]
fn given_env_override_when_load_then_env_wins_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rsnote.toml");
    fs::write(&path, "[render]\nmarker = \"==\"\n").unwrap();

    std::env::set_var("RSNOTE_RENDER__MARKER", ">>");
    let settings = Settings::load(Some(path.as_path()));
    std::env::remove_var("RSNOTE_RENDER__MARKER");

    assert_eq!(settings.expect("load settings").render.marker, ">>");
}
