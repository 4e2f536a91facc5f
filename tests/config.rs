use recordbase::config::{Config, MAX_QUERY_TIMEOUT_SECS};
use std::time::Duration;

fn scratch_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("recordbase-config-{}", uuid::Uuid::new_v4()))
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.database.url, "sqlite::memory:");
    assert_eq!(config.database.max_connections, 4);
    assert_eq!(config.database.query_timeout(), Duration::from_secs(30));
    assert!(!config.database.sqlx_logging);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    config.database.url = "  ".to_string();
    assert!(config.validate().is_err());

    config.database.url = "postgres://localhost/db".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.database.max_connections = 0;
    assert!(config.validate().is_err());

    config = Config::default();
    config.database.query_timeout_secs = 0;
    assert!(config.validate().is_err());
    config.database.query_timeout_secs = MAX_QUERY_TIMEOUT_SECS + 1;
    assert!(config.validate().is_err());
    config.database.query_timeout_secs = MAX_QUERY_TIMEOUT_SECS;
    assert!(config.validate().is_ok());

    config.logging.level = "chatty".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_level_filter() {
    let mut config = Config::default();
    config.logging.level = "DEBUG".to_string();
    assert_eq!(config.logging.level_filter().unwrap(), log::LevelFilter::Debug);
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("url = \"sqlite::memory:\""));
    assert!(toml_str.contains("query_timeout_secs = 30"));
}

#[test]
fn test_partial_config_deserialization() {
    let partial_toml = r#"
[database]
url = "sqlite://records.db?mode=rwc"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert_eq!(config.database.url, "sqlite://records.db?mode=rwc");
    assert!(config.logging.enabled);

    // Unspecified values use defaults
    assert_eq!(config.database.max_connections, 4);
    assert_eq!(config.database.query_timeout_secs, 30);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.database.url, default_config.database.url);
    assert_eq!(config.database.query_timeout_secs, default_config.database.query_timeout_secs);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
}

#[test]
fn test_generate_and_load_default_config() {
    let dir = scratch_dir();
    let path = dir.join("nested").join("recordbase.toml");

    Config::generate_default_config(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# recordbase Configuration File"));

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.database.url, Config::default().database.url);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_load_rejects_invalid_file() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("recordbase.toml");
    std::fs::write(&path, "[database]\nmax_connections = 0\n").unwrap();

    assert!(Config::load_from_file(&path).is_err());
    assert!(Config::load_from_file(dir.join("missing.toml")).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
