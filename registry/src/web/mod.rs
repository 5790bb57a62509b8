// File: registry/src/web/mod.rs
pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use std::sync::Arc;

use crate::config::Config;
use crate::database::Database;
use crate::services::MailServerService;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mail_servers: Arc<MailServerService>,
}

impl AppState {
    pub fn new(config: Arc<Config>, database: Arc<Database>) -> Self {
        Self {
            config,
            mail_servers: Arc::new(MailServerService::new(database)),
        }
    }
}
