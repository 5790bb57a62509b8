//! Database record types (entities).
//!
//! This module contains all the record structs used by the database layer.
//! Records serialize with camelCase keys, which is the shape the HTTP API
//! returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Mail servers
// ============================================================================

/// Operational label of a mail server. No transitions are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    #[default]
    Active,
    Cooldown,
    Disabled,
    Maintenance,
}

impl ServerStatus {
    pub const ALL: [ServerStatus; 4] = [
        ServerStatus::Active,
        ServerStatus::Cooldown,
        ServerStatus::Disabled,
        ServerStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Active => "active",
            ServerStatus::Cooldown => "cooldown",
            ServerStatus::Disabled => "disabled",
            ServerStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServerStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid status '{}': expected one of active, cooldown, disabled, maintenance",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailServerRecord {
    pub id: i64,
    pub server_id: String,
    pub name: String,
    pub hostname: String, // provider, e.g. "resend", "mailtrap"
    // Limits and usage
    pub daily_limit: i64,
    pub monthly_limit: i64,
    pub daily_sent: i64,
    pub monthly_sent: i64,
    // Reset tracking
    pub last_daily_reset: DateTime<Utc>,
    pub last_monthly_reset: DateTime<Utc>,
    pub status: ServerStatus,
    pub priority: i64, // higher is preferred
    pub consecutive_failures: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A mail server row that has not been inserted yet.
#[derive(Debug, Clone)]
pub struct NewMailServer {
    pub server_id: String,
    pub name: String,
    pub hostname: String,
    pub daily_limit: i64,
    pub monthly_limit: i64,
    pub priority: i64,
    pub created_at: DateTime<Utc>,
}

/// Returned by a successful delete instead of the full prior record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedServerSummary {
    pub server_id: String,
    pub name: String,
    pub hostname: String,
    pub deleted_at: DateTime<Utc>,
}

// ============================================================================
// Blogs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRecord {
    pub blog_id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: String,
    pub tags: Option<String>,
    // Author
    pub author_name: String,
    pub author_id: Option<String>,
    pub author_bio: Option<String>,
    pub author_profile_image: Option<String>,
    // Media
    pub featured_image: Option<String>,
    pub featured_image_alt_text: Option<String>,
    // Publishing
    pub is_featured: bool,
    pub is_published: bool,
    pub status: String,
    pub scheduled_at: Option<String>,
    pub published_at: String,
    pub estimated_read_time: Option<i64>,
    // SEO
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    // Engagement
    pub views: i64,
    pub comments: i64,
    pub upvotes: i64,
    pub downvotes: i64,
    pub shares: i64,
    pub related_blogs: Option<String>, // JSON array of blog ids
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
