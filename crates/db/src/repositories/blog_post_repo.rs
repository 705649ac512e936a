//! Repository for the `blog_posts` table.

use sqlx::PgPool;

use scriptum_core::types::DbId;

use crate::models::blog_post::{BlogPost, CreateBlogPost, UpdateBlogPost};

const COLUMNS: &str = "id, title, slug, excerpt, content, cover_image_url, tags, is_published, \
                        published_at, author_id, created_at, updated_at";

/// Provides CRUD operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a post. `slug` and `tags` are already normalized by the caller.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlogPost,
        slug: &str,
        tags: &[String],
        author_id: Option<DbId>,
    ) -> Result<BlogPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts
                (title, slug, excerpt, content, cover_image_url, tags, is_published,
                 published_at, author_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, CASE WHEN $7 THEN NOW() END, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.cover_image_url)
            .bind(tags)
            .bind(input.is_published)
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1 AND is_published");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List posts, newest publication first; drafts sort by creation time.
    ///
    /// `tag` matches case-insensitively against any of the post's tags.
    pub async fn list(
        pool: &PgPool,
        published_only: bool,
        tag: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE (NOT $1 OR is_published)
               AND ($2::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM unnest(tags) AS t WHERE lower(t) = lower($2)))
             ORDER BY COALESCE(published_at, created_at) DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(published_only)
            .bind(tag)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. `published_at` is set the first time the post
    /// is published and is never cleared.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
        slug: Option<&str>,
        tags: Option<&[String]>,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                content = COALESCE($5, content),
                cover_image_url = COALESCE($6, cover_image_url),
                tags = COALESCE($7, tags),
                is_published = COALESCE($8, is_published),
                published_at = CASE
                    WHEN COALESCE($8, is_published) AND published_at IS NULL THEN NOW()
                    ELSE published_at
                END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.cover_image_url)
            .bind(tags)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
