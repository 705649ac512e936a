//! Handlers for `/admin/blog` (blog post management).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::slug::{resolve_slug, validate_slug};
use scriptum_core::types::DbId;
use scriptum_core::validation::{blank_to_none, normalize_string_list};
use scriptum_db::models::blog_post::{CreateBlogPost, UpdateBlogPost};
use scriptum_db::repositories::BlogPostRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Filters for `GET /admin/blog`.
#[derive(Debug, Deserialize)]
pub struct AdminBlogListParams {
    pub tag: Option<String>,
    #[serde(default = "default_true")]
    pub include_unpublished: bool,
}

fn default_true() -> bool {
    true
}

/// POST /api/admin/blog
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    let tags = normalize_string_list("tags", &input.tags)?;

    let post = BlogPostRepo::create(&state.pool, &input, &slug, &tags, Some(admin.user_id)).await?;

    tracing::info!(
        post_id = post.id,
        slug = %post.slug,
        published = post.is_published,
        user_id = admin.user_id,
        "Blog post created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /api/admin/blog
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(params): Query<AdminBlogListParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let tag = blank_to_none(params.tag);
    let posts = BlogPostRepo::list(
        &state.pool,
        !params.include_unpublished,
        tag.as_deref(),
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/admin/blog/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: post }))
}

/// PATCH /api/admin/blog/{id}
///
/// Publishing stamps `published_at` the first time; unpublishing keeps it.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let slug = match input.slug.as_deref() {
        Some(s) => {
            let s = s.trim().to_string();
            validate_slug(&s)?;
            Some(s)
        }
        None => None,
    };
    let tags = match &input.tags {
        Some(tags) => Some(normalize_string_list("tags", tags)?),
        None => None,
    };

    let post = BlogPostRepo::update(&state.pool, id, &input, slug.as_deref(), tags.as_deref())
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(post_id = id, user_id = admin.user_id, "Blog post updated");

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/admin/blog/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BlogPostRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(post_id = id, user_id = admin.user_id, "Blog post deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "BlogPost",
        id,
    })
}
