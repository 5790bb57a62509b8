// File: registry/src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use mail_registry::constants::defaults;
use mail_registry::web::start_web_server;
use mail_registry::{ConfigManager, Database};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("mail_registry=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("sqlx=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting Mail Server Registry");

    let config_dir =
        std::env::var("CONFIG_DIR").unwrap_or_else(|_| defaults::CONFIG_DIR.to_string());
    let config_manager = ConfigManager::new(config_dir).await?;
    let config = config_manager.get_current_config();

    let database = Arc::new(Database::new(&config.database_path).await?);
    info!("Database initialized");

    start_web_server(config, database).await?;

    Ok(())
}
