//! Handlers for `/admin/users` (login accounts).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::roles::{validate_role, ROLE_ADMIN};
use scriptum_core::types::DbId;
use scriptum_db::models::user::{CreateUser, UpdateUser, UserResponse};
use scriptum_db::repositories::UserRepo;

use crate::auth::password::hash_new_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/admin/users
///
/// Validates password strength, hashes it, and returns the safe
/// [`UserResponse`] with 201 Created.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_role(&input.role)?;
    let hashed = hash_new_password(&input.password)?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password_hash: hashed,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(
        target_user_id = user.id,
        user_id = admin.user_id,
        role = %user.role,
        "User created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// GET /api/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let users = UserRepo::list(&state.pool, limit, offset).await?;
    let data: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PATCH /api/admin/users/{id}
///
/// Update profile fields (not the password). An admin cannot deactivate or
/// demote their own account.
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(role) = &input.role {
        validate_role(role)?;
    }
    if id == admin.user_id {
        let deactivating = input.is_active == Some(false);
        let demoting = input.role.as_deref().is_some_and(|r| r != ROLE_ADMIN);
        if deactivating || demoting {
            return Err(AppError::Core(CoreError::Conflict(
                "You cannot deactivate or demote your own account".into(),
            )));
        }
    }
    input.email = input.email.map(|e| e.trim().to_lowercase());

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(target_user_id = id, user_id = admin.user_id, "User updated");

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// DELETE /api/admin/users/{id}
///
/// Soft-deactivate a user (sets `is_active = false`). Returns 204 No Content.
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "You cannot deactivate your own account".into(),
        )));
    }

    if UserRepo::deactivate(&state.pool, id).await? {
        tracing::info!(target_user_id = id, user_id = admin.user_id, "User deactivated");
        return Ok(StatusCode::NO_CONTENT);
    }

    // Either missing or already inactive.
    match UserRepo::find_by_id(&state.pool, id).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::Core(CoreError::NotFound { entity: "User", id })),
    }
}

/// POST /api/admin/users/{id}/reset-password
///
/// Also clears any login lockout.
pub async fn reset_password(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    let hashed = hash_new_password(&input.new_password)?;

    if UserRepo::update_password(&state.pool, id, &hashed).await? {
        tracing::info!(target_user_id = id, user_id = admin.user_id, "Password reset");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}
