//! Blog row operations.
//!
//! Blogs have no HTTP surface; these queries keep the table shape honest.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use super::records::BlogRecord;
use super::Database;
use crate::errors::DatabaseError;

impl Database {
    pub async fn insert_blog(&self, blog: &BlogRecord) -> Result<(), DatabaseError> {
        debug!("Inserting blog: {} ({})", blog.slug, blog.blog_id);

        sqlx::query(
            r#"
            INSERT INTO blogs (
                blog_id, title, slug, excerpt, content, category, tags,
                author_name, author_id, featured_image, featured_image_alt_text,
                is_featured, is_published, views, seo_title, seo_description,
                created_at, updated_at, estimated_read_time, scheduled_at,
                comments, upvotes, downvotes, published_at, shares,
                author_bio, author_profile_image, related_blogs, status, external_url
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&blog.blog_id)
        .bind(&blog.title)
        .bind(&blog.slug)
        .bind(&blog.excerpt)
        .bind(&blog.content)
        .bind(&blog.category)
        .bind(&blog.tags)
        .bind(&blog.author_name)
        .bind(&blog.author_id)
        .bind(&blog.featured_image)
        .bind(&blog.featured_image_alt_text)
        .bind(blog.is_featured)
        .bind(blog.is_published)
        .bind(blog.views)
        .bind(&blog.seo_title)
        .bind(&blog.seo_description)
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .bind(blog.estimated_read_time)
        .bind(&blog.scheduled_at)
        .bind(blog.comments)
        .bind(blog.upvotes)
        .bind(blog.downvotes)
        .bind(&blog.published_at)
        .bind(blog.shares)
        .bind(&blog.author_bio)
        .bind(&blog.author_profile_image)
        .bind(&blog.related_blogs)
        .bind(&blog.status)
        .bind(&blog.external_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_blog_by_slug(&self, slug: &str) -> Result<Option<BlogRecord>, DatabaseError> {
        let row = sqlx::query("SELECT * FROM blogs WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_blog(&row)?)),
            None => Ok(None),
        }
    }

    fn row_to_blog(row: &SqliteRow) -> Result<BlogRecord, DatabaseError> {
        Ok(BlogRecord {
            blog_id: row.try_get("blog_id")?,
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            excerpt: row.try_get("excerpt")?,
            content: row.try_get("content")?,
            category: row.try_get("category")?,
            tags: row.try_get("tags")?,
            author_name: row.try_get("author_name")?,
            author_id: row.try_get("author_id")?,
            author_bio: row.try_get("author_bio")?,
            author_profile_image: row.try_get("author_profile_image")?,
            featured_image: row.try_get("featured_image")?,
            featured_image_alt_text: row.try_get("featured_image_alt_text")?,
            is_featured: row.try_get("is_featured")?,
            is_published: row.try_get("is_published")?,
            status: row.try_get("status")?,
            scheduled_at: row.try_get("scheduled_at")?,
            published_at: row.try_get("published_at")?,
            estimated_read_time: row.try_get("estimated_read_time")?,
            seo_title: row.try_get("seo_title")?,
            seo_description: row.try_get("seo_description")?,
            views: row.try_get("views")?,
            comments: row.try_get("comments")?,
            upvotes: row.try_get("upvotes")?,
            downvotes: row.try_get("downvotes")?,
            shares: row.try_get("shares")?,
            related_blogs: row.try_get("related_blogs")?,
            external_url: row.try_get("external_url")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
