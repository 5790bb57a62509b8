//! Unit tests for configuration parsing
//!
//! These tests verify that `main.toml` is parsed correctly and that omitted
//! keys fall back to their defaults.

use mail_registry::config::Config;
use mail_registry::ConfigManager;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_main_config() {
    let main_toml = r#"
host = "127.0.0.1"
port = 8080
database_path = "var/registry.db"
route_prefix = "/api/mail"
    "#;

    let config: Config = toml::from_str(main_toml).unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.database_path, "var/registry.db");
    assert_eq!(config.route_prefix, "/api/mail");
    assert_eq!(config.bind_address(), "127.0.0.1:8080");
}

#[test]
fn test_omitted_keys_use_defaults() {
    let config: Config = toml::from_str("port = 9100").unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 9100);
    assert_eq!(config.database_path, "data/mail_servers.db");
    assert!(config.route_prefix.is_empty());
}

#[test]
fn test_invalid_port_is_rejected() {
    assert!(toml::from_str::<Config>("port = 70000").is_err());
}

#[tokio::test]
async fn test_config_manager_reads_config_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    fs::create_dir(&config_dir).unwrap();
    fs::write(config_dir.join("main.toml"), "port = 8181\n").unwrap();

    let manager = ConfigManager::new(config_dir.display().to_string())
        .await
        .unwrap();

    assert_eq!(manager.get_current_config().port, 8181);
}
