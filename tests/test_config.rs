use std::io::Write;

use grid_invaders::config::{FormationSpawn, GameConfig};
use grid_invaders::constants::EGG_INTERVAL;

#[test]
fn load_reads_partial_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "score_per_enemy = 250").unwrap();
    writeln!(file, "formation_spawn = \"periodic\"").unwrap();

    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.score_per_enemy, 250);
    assert_eq!(config.formation_spawn, FormationSpawn::Periodic);
    assert_eq!(config.egg_interval, EGG_INTERVAL);
}

#[test]
fn load_reports_file_name_on_bad_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "score_per_enemy = \"lots\"").unwrap();

    let err = GameConfig::load(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains(&file.path().display().to_string()));
}

#[test]
fn load_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "play_width = 0.0").unwrap();
    assert!(GameConfig::load(file.path()).is_err());
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(GameConfig::load_or_default(Some(&missing)).is_err());
}

#[test]
fn explicit_file_wins() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "grace_ticks = 30").unwrap();
    let config = GameConfig::load_or_default(Some(file.path())).unwrap();
    assert_eq!(config.grace_ticks, 30);
}
