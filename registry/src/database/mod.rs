//! Database layer for the mail server registry.
//!
//! This module provides SQLite persistence for:
//! - Mail server records (identity, quota counters, health labels)
//! - Blog posts (schema and basic row access)
//!
//! The module is organized into submodules:
//! - `records` - All record types (entities)
//! - `mail_servers` - Mail server CRUD operations
//! - `blogs` - Blog row operations

mod blogs;
mod mail_servers;
mod records;

pub use records::*;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};
use std::path::Path;
use tracing::{debug, error, info};

pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Expose pool for integration test queries
    #[allow(dead_code)]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn new(database_path: &str) -> Result<Self> {
        info!("=== Starting database initialization ===");
        info!("Database path: {}", database_path);

        if let Some(parent) = Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                debug!("Ensuring parent directory exists: {:?}", parent);
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    error!("FAILED to create parent directory {:?}: {}", parent, e);
                    return Err(e.into());
                }
            }
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path);
        info!("Connecting to database with URL: {}", database_url);

        let pool = match SqlitePool::connect(&database_url).await {
            Ok(pool) => {
                info!("Successfully connected to SQLite database");
                pool
            }
            Err(e) => {
                error!("FAILED to connect to database: {}", e);
                error!("   Connection URL: {}", database_url);
                return Err(e.into());
            }
        };

        let database = Self { pool };
        database.prepare().await?;

        info!("=== Database initialization completed successfully ===");
        Ok(database)
    }

    /// Single-connection in-memory database. Every connection to
    /// `sqlite::memory:` is a fresh database, so the pool holds exactly one
    /// connection and never recycles it.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let database = Self { pool };
        database.prepare().await?;
        Ok(database)
    }

    async fn prepare(&self) -> Result<()> {
        match self.initialize_tables().await {
            Ok(_) => info!("Database tables initialized successfully"),
            Err(e) => {
                error!("CRITICAL: Database table initialization failed: {}", e);
                return Err(e);
            }
        }

        match self.test_database().await {
            Ok(_) => debug!("Database test successful"),
            Err(e) => {
                error!("Database test failed: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    async fn initialize_tables(&self) -> Result<()> {
        info!("Step 1: Creating mail_servers table...");
        let mail_servers_sql = r#"
            CREATE TABLE IF NOT EXISTS mail_servers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                server_id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                hostname TEXT NOT NULL,
                daily_limit INTEGER NOT NULL,
                monthly_limit INTEGER NOT NULL,
                daily_sent INTEGER NOT NULL DEFAULT 0,
                monthly_sent INTEGER NOT NULL DEFAULT 0,
                last_daily_reset DATETIME NOT NULL,
                last_monthly_reset DATETIME NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                priority INTEGER NOT NULL DEFAULT 0,
                consecutive_failures INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
        "#;
        if let Err(e) = sqlx::query(mail_servers_sql).execute(&self.pool).await {
            error!("FAILED to create mail_servers table: {}", e);
            return Err(e.into());
        }

        info!("Step 2: Creating mail_servers indexes...");
        let status_idx =
            "CREATE INDEX IF NOT EXISTS idx_mail_servers_status ON mail_servers(status)";
        if let Err(e) = sqlx::query(status_idx).execute(&self.pool).await {
            error!("FAILED to create mail_servers status index: {}", e);
            return Err(e.into());
        }
        let priority_idx =
            "CREATE INDEX IF NOT EXISTS idx_mail_servers_priority ON mail_servers(priority)";
        if let Err(e) = sqlx::query(priority_idx).execute(&self.pool).await {
            error!("FAILED to create mail_servers priority index: {}", e);
            return Err(e.into());
        }

        info!("Step 3: Creating blogs table...");
        let blogs_sql = r#"
            CREATE TABLE IF NOT EXISTS blogs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                blog_id TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                excerpt TEXT,
                content TEXT NOT NULL,
                category TEXT NOT NULL,
                tags TEXT,
                author_name TEXT NOT NULL,
                author_id TEXT,
                featured_image TEXT,
                featured_image_alt_text TEXT,
                is_featured BOOLEAN NOT NULL DEFAULT 0,
                is_published BOOLEAN NOT NULL DEFAULT 0,
                views INTEGER NOT NULL DEFAULT 0,
                seo_title TEXT,
                seo_description TEXT,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL,
                estimated_read_time INTEGER,
                scheduled_at TEXT,
                comments INTEGER NOT NULL DEFAULT 0,
                upvotes INTEGER NOT NULL DEFAULT 0,
                downvotes INTEGER NOT NULL DEFAULT 0,
                published_at TEXT NOT NULL,
                shares INTEGER NOT NULL DEFAULT 0,
                author_bio TEXT,
                author_profile_image TEXT,
                related_blogs TEXT,
                status TEXT NOT NULL DEFAULT 'draft',
                external_url TEXT
            )
        "#;
        if let Err(e) = sqlx::query(blogs_sql).execute(&self.pool).await {
            error!("FAILED to create blogs table: {}", e);
            return Err(e.into());
        }

        info!("All database tables and indexes created successfully");
        Ok(())
    }

    async fn test_database(&self) -> Result<()> {
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('mail_servers', 'blogs')",
        )
        .fetch_all(&self.pool)
        .await?;

        if tables.len() != 2 {
            error!("Expected 2 tables, found {}: {:?}", tables.len(), tables);
            return Err(anyhow::anyhow!("Database tables not properly created"));
        }
        debug!("Both required tables exist: {:?}", tables);
        Ok(())
    }
}
