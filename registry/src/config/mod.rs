// File: registry/src/config/mod.rs
pub mod manager;
use serde::{Deserialize, Serialize};
pub use manager::ConfigManager;

use crate::constants::defaults;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    // Mount point of the mail server routes; empty mounts them at the root
    #[serde(default)]
    pub route_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            route_prefix: String::new(),
        }
    }
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    defaults::HOST.to_string()
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_database_path() -> String {
    defaults::DATABASE_PATH.to_string()
}
