// File: registry/src/config/manager.rs
use super::Config;
use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = Path::new(config_dir).join("main.toml");

        if !fs::try_exists(&main_config_path).await.unwrap_or(false) {
            warn!(
                "No config found at {}, using defaults",
                main_config_path.display()
            );
            return Ok(Config::default());
        }

        let main_config_content = fs::read_to_string(&main_config_path)
            .await
            .map_err(|e| anyhow!("Failed to read main config {}: {}", main_config_path.display(), e))?;

        let config: Config = toml::from_str(&main_config_content)
            .map_err(|e| anyhow!("Failed to parse main config: {}", e))?;

        info!(
            "Loaded config from {}: bind {}, database {}",
            main_config_path.display(),
            config.bind_address(),
            config.database_path
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_main_toml_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::new(dir.path().display().to_string())
            .await
            .unwrap();

        assert_eq!(*manager.get_current_config(), Config::default());
    }

    #[tokio::test]
    async fn test_loads_main_toml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("main.toml"),
            r#"
host = "127.0.0.1"
port = 9000
database_path = "/tmp/servers.db"
route_prefix = "/mail"
"#,
        )
        .unwrap();

        let manager = ConfigManager::new(dir.path().display().to_string())
            .await
            .unwrap();
        let config = manager.get_current_config();

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.database_path, "/tmp/servers.db");
        assert_eq!(config.route_prefix, "/mail");
    }

    #[tokio::test]
    async fn test_malformed_main_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("main.toml"), "port = \"not a number\"").unwrap();

        assert!(ConfigManager::new(dir.path().display().to_string())
            .await
            .is_err());
    }
}
