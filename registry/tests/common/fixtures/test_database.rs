//! Test database utilities for in-memory SQLite testing

use anyhow::Result;
use mail_registry::{Database, MailServerService};
use std::sync::Arc;

/// Test database wrapper for in-memory SQLite
pub struct TestDatabase {
    db: Arc<Database>,
}

impl TestDatabase {
    /// Create a new in-memory test database with the registry tables
    pub async fn new() -> Result<Self> {
        Ok(Self {
            db: Arc::new(Database::in_memory().await?),
        })
    }

    pub fn db(&self) -> Arc<Database> {
        self.db.clone()
    }

    pub fn service(&self) -> MailServerService {
        MailServerService::new(self.db.clone())
    }

    /// Installs a trigger that silently drops every `operation` (`UPDATE` or
    /// `DELETE`) on `mail_servers`, so the row survives the lookup but the
    /// write touches nothing.
    pub async fn drop_mail_server_writes(&self, operation: &str) -> Result<()> {
        let sql = format!(
            "CREATE TRIGGER drop_mail_server_{op} BEFORE {op} ON mail_servers \
             BEGIN SELECT RAISE(IGNORE); END",
            op = operation
        );
        sqlx::query(&sql).execute(self.db.pool()).await?;
        Ok(())
    }

    /// Number of rows currently in `mail_servers`
    pub async fn mail_server_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mail_servers")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}
