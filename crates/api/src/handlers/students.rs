//! Handlers for `/admin/students`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::types::DbId;
use scriptum_core::validation::blank_to_none;
use scriptum_db::models::student::{CreateStudent, StudentWithStats, UpdateStudent};
use scriptum_db::repositories::StudentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Filters for `GET /admin/students`.
#[derive(Debug, Default, Deserialize)]
pub struct StudentListParams {
    /// Matches name or email.
    pub search: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

/// POST /api/admin/students
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateStudent>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    input.email = input.email.trim().to_lowercase();

    let student = StudentRepo::create(&state.pool, &input).await?;

    tracing::info!(student_id = student.id, user_id = admin.user_id, "Student created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: student })))
}

/// GET /api/admin/students
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(params): Query<StudentListParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let search = blank_to_none(params.search);
    let students = StudentRepo::list(
        &state.pool,
        search.as_deref(),
        params.include_inactive,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/admin/students/{id}
///
/// Includes the number of orders the student has placed.
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    let order_count = StudentRepo::count_orders(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: StudentWithStats {
            student,
            order_count,
        },
    }))
}

/// PATCH /api/admin/students/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateStudent>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    input.email = input.email.map(|e| e.trim().to_lowercase());

    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;

    tracing::info!(student_id = id, user_id = admin.user_id, "Student updated");

    Ok(Json(DataResponse { data: student }))
}

/// DELETE /api/admin/students/{id}
///
/// Rejected with 409 while the student has orders; deactivate instead.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let orders = StudentRepo::count_orders(&state.pool, id).await?;
    if orders > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Student has {orders} order(s) and cannot be deleted; deactivate the student instead"
        ))));
    }

    if !StudentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }));
    }

    tracing::info!(student_id = id, user_id = admin.user_id, "Student deleted");

    Ok(StatusCode::NO_CONTENT)
}
