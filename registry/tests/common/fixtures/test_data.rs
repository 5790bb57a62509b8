//! Common test data and constants

use chrono::Utc;
use mail_registry::database::{BlogRecord, NewMailServer};
use mail_registry::services::{CreateMailServerRequest, NumericInput};
use serde_json::{json, Value};

/// Common provider hostnames
pub mod providers {
    pub const RESEND: &str = "resend";
    pub const MAILTRAP: &str = "mailtrap";
}

/// JSON body accepted by `POST /add-server`
pub fn create_payload(name: &str, priority: i64) -> Value {
    json!({
        "name": name,
        "hostname": providers::RESEND,
        "dailyLimit": 100,
        "monthlyLimit": 3000,
        "priority": priority
    })
}

/// Typed create request for service-level tests
pub fn create_request(name: &str, priority: i64) -> CreateMailServerRequest {
    CreateMailServerRequest {
        name: Some(name.to_string()),
        hostname: Some(providers::MAILTRAP.to_string()),
        daily_limit: Some(NumericInput::Int(200)),
        monthly_limit: Some(NumericInput::Int(6000)),
        priority: Some(NumericInput::Int(priority)),
    }
}

/// Pre-built row for database-level tests
pub fn new_mail_server(server_id: &str) -> NewMailServer {
    NewMailServer {
        server_id: server_id.to_string(),
        name: "mail-server-1".to_string(),
        hostname: providers::RESEND.to_string(),
        daily_limit: 100,
        monthly_limit: 3000,
        priority: 1,
        created_at: Utc::now(),
    }
}

pub fn sample_blog(blog_id: &str, slug: &str) -> BlogRecord {
    let now = Utc::now();
    BlogRecord {
        blog_id: blog_id.to_string(),
        title: "Warming up a new sending domain".to_string(),
        slug: slug.to_string(),
        excerpt: Some("Ramp volume slowly".to_string()),
        content: "Start with a few hundred messages a day.".to_string(),
        category: "deliverability".to_string(),
        tags: Some("email,dns".to_string()),
        author_name: "Ops Team".to_string(),
        author_id: None,
        author_bio: None,
        author_profile_image: None,
        featured_image: None,
        featured_image_alt_text: None,
        is_featured: false,
        is_published: true,
        status: "published".to_string(),
        scheduled_at: None,
        published_at: now.to_rfc3339(),
        estimated_read_time: Some(4),
        seo_title: None,
        seo_description: None,
        views: 0,
        comments: 0,
        upvotes: 3,
        downvotes: 0,
        shares: 1,
        related_blogs: None,
        external_url: None,
        created_at: now,
        updated_at: now,
    }
}
