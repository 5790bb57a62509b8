//! Mail server CRUD database operations.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{debug, error};

use super::records::{MailServerRecord, NewMailServer, ServerStatus};
use super::Database;
use crate::errors::DatabaseError;

const MAIL_SERVER_COLUMNS: &str = r#"
    id, server_id, name, hostname, daily_limit, monthly_limit,
    daily_sent, monthly_sent, last_daily_reset, last_monthly_reset,
    status, priority, consecutive_failures, created_at, updated_at
"#;

impl Database {
    /// Inserts a new server with zeroed counters and both reset timestamps at
    /// creation time. A duplicate `server_id` is reported as a constraint
    /// violation; there is no retry.
    pub async fn insert_mail_server(
        &self,
        server: &NewMailServer,
    ) -> Result<MailServerRecord, DatabaseError> {
        debug!("Inserting mail server: {}", server.server_id);

        let sql = format!(
            r#"
            INSERT INTO mail_servers (
                server_id, name, hostname, daily_limit, monthly_limit,
                daily_sent, monthly_sent, last_daily_reset, last_monthly_reset,
                status, priority, consecutive_failures, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, 0, 0, ?, ?, ?, ?, 0, ?, ?)
            RETURNING {}
            "#,
            MAIL_SERVER_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(&server.server_id)
            .bind(&server.name)
            .bind(&server.hostname)
            .bind(server.daily_limit)
            .bind(server.monthly_limit)
            .bind(server.created_at)
            .bind(server.created_at)
            .bind(ServerStatus::Active.as_str())
            .bind(server.priority)
            .bind(server.created_at)
            .bind(server.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to insert mail server {}: {}", server.server_id, e);
                DatabaseError::from(e)
            })?;

        Self::row_to_mail_server(&row)
    }

    /// All servers, highest priority first. Equal priorities come back in
    /// insertion order.
    pub async fn get_all_mail_servers(&self) -> Result<Vec<MailServerRecord>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM mail_servers ORDER BY priority DESC, id ASC",
            MAIL_SERVER_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut servers = Vec::with_capacity(rows.len());
        for row in &rows {
            servers.push(Self::row_to_mail_server(row)?);
        }
        debug!("Fetched {} mail servers", servers.len());
        Ok(servers)
    }

    pub async fn get_mail_server_by_server_id(
        &self,
        server_id: &str,
    ) -> Result<Option<MailServerRecord>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM mail_servers WHERE server_id = ? LIMIT 1",
            MAIL_SERVER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(server_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_mail_server(&row)?)),
            None => {
                debug!("No mail server found with ID: {}", server_id);
                Ok(None)
            }
        }
    }

    /// Writes the updatable columns of `server` back to its row.
    /// Returns `None` when no row matched `server_id`.
    pub async fn update_mail_server(
        &self,
        server: &MailServerRecord,
    ) -> Result<Option<MailServerRecord>, DatabaseError> {
        debug!("Updating mail server: {}", server.server_id);

        let sql = format!(
            r#"
            UPDATE mail_servers
            SET name = ?, hostname = ?, daily_limit = ?, monthly_limit = ?,
                status = ?, priority = ?, updated_at = ?
            WHERE server_id = ?
            RETURNING {}
            "#,
            MAIL_SERVER_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(&server.name)
            .bind(&server.hostname)
            .bind(server.daily_limit)
            .bind(server.monthly_limit)
            .bind(server.status.as_str())
            .bind(server.priority)
            .bind(server.updated_at)
            .bind(&server.server_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_mail_server(&row)).transpose()
    }

    /// Hard delete. Returns whether a row was removed.
    pub async fn delete_mail_server(&self, server_id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM mail_servers WHERE server_id = ?")
            .bind(server_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_mail_server(row: &SqliteRow) -> Result<MailServerRecord, DatabaseError> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<ServerStatus>()
            .map_err(|reason| DatabaseError::SerializationError { reason })?;

        Ok(MailServerRecord {
            id: row.try_get("id")?,
            server_id: row.try_get("server_id")?,
            name: row.try_get("name")?,
            hostname: row.try_get("hostname")?,
            daily_limit: row.try_get("daily_limit")?,
            monthly_limit: row.try_get("monthly_limit")?,
            daily_sent: row.try_get("daily_sent")?,
            monthly_sent: row.try_get("monthly_sent")?,
            last_daily_reset: row.try_get("last_daily_reset")?,
            last_monthly_reset: row.try_get("last_monthly_reset")?,
            status,
            priority: row.try_get("priority")?,
            consecutive_failures: row.try_get("consecutive_failures")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
