//! Blog post model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptum_core::types::{DbId, Timestamp};
use scriptum_core::validation::not_blank;

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    /// Rich-text HTML produced by the editor; stored as-is.
    pub content: String,
    pub cover_image_url: Option<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
    /// Set the first time the post is published and kept afterwards.
    pub published_at: Option<Timestamp>,
    pub author_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateBlogPost {
    #[validate(length(min = 1, max = 300), custom(function = "not_blank"))]
    pub title: String,
    pub slug: Option<String>,
    #[validate(length(max = 1000))]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    #[validate(length(max = 2000))]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Default, Deserialize, validator::Validate)]
pub struct UpdateBlogPost {
    #[validate(length(min = 1, max = 300), custom(function = "not_blank"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 1000))]
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[validate(length(max = 2000))]
    pub cover_image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}
