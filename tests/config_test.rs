//! Tests for configuration loading.

use std::io::Write;
use std::time::Duration;
use tictactoe::GameConfig;
use tictactoe_core::GameMode;

#[test]
fn test_defaults_when_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::load_or_default(dir.path().join("missing.toml")).unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(*config.mode(), GameMode::PlayerVsAi);
    assert_eq!(config.ai_delay(), Duration::from_millis(500));
    assert_eq!(*config.seed(), None);
}

#[test]
fn test_loads_partial_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "mode = \"pvp\"\nseed = 7").unwrap();

    let config = GameConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.mode(), GameMode::PlayerVsPlayer);
    assert_eq!(*config.seed(), Some(7));
    assert_eq!(*config.ai_delay_ms(), 500);
}

#[test]
fn test_round_trips_through_toml() {
    let config = GameConfig::default()
        .with_mode(GameMode::PlayerVsPlayer)
        .with_ai_delay_ms(250)
        .with_seed(99);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config.to_toml().unwrap().as_bytes()).unwrap();

    assert_eq!(GameConfig::from_file(file.path()).unwrap(), config);
}

#[test]
fn test_rejects_bad_mode() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "mode = \"minimax\"").unwrap();

    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}
