//! Handlers for `/admin/services` (the service catalogue).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::slug::{resolve_slug, validate_slug};
use scriptum_core::types::DbId;
use scriptum_core::validation::normalize_string_list;
use scriptum_db::models::service::{CreateService, UpdateService};
use scriptum_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{IncludeInactiveParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/admin/services
///
/// The slug is derived from the title when omitted.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateService>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let slug = resolve_slug(input.slug.as_deref(), &input.title)?;
    input.features = normalize_string_list("features", &input.features)?;
    input.countries = normalize_string_list("countries", &input.countries)?;

    let service = ServiceRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        service_id = service.id,
        slug = %service.slug,
        user_id = admin.user_id,
        "Service created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// GET /api/admin/services
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let services = ServiceRepo::list(&state.pool, params.include_inactive, limit, offset).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/admin/services/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: service }))
}

/// PATCH /api/admin/services/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateService>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(slug) = input.slug.as_mut() {
        *slug = slug.trim().to_string();
        validate_slug(slug)?;
    }
    if let Some(features) = &input.features {
        input.features = Some(normalize_string_list("features", features)?);
    }
    if let Some(countries) = &input.countries {
        input.countries = Some(normalize_string_list("countries", countries)?);
    }

    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(service_id = id, user_id = admin.user_id, "Service updated");

    Ok(Json(DataResponse { data: service }))
}

/// DELETE /api/admin/services/{id}
///
/// Rejected with 409 while orders use the service.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let orders = ServiceRepo::count_orders(&state.pool, id).await?;
    if orders > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Service is used by {orders} order(s); deactivate it instead"
        ))));
    }

    if !ServiceRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(service_id = id, user_id = admin.user_id, "Service deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Service",
        id,
    })
}
