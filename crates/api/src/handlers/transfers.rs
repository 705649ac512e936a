//! Handlers for `/admin/transfers` (payouts to employees).
//!
//! A transfer may exceed the employee's current balance: advances are
//! allowed and simply show up as a negative balance.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::types::DbId;
use scriptum_db::models::transfer::{CreateTransfer, TransferFilter, UpdateTransfer};
use scriptum_db::repositories::{EmployeeRepo, TransferRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/admin/transfers
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTransfer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    EmployeeRepo::find_by_id(&state.pool, input.employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        }))?;

    let transfer = TransferRepo::create(&state.pool, &input).await?;

    tracing::info!(
        transfer_id = transfer.id,
        employee_id = transfer.employee_id,
        amount = transfer.amount,
        user_id = admin.user_id,
        "Transfer created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: transfer })))
}

/// GET /api/admin/transfers
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(filter): Query<TransferFilter>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let transfers = TransferRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: transfers }))
}

/// GET /api/admin/transfers/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let transfer = TransferRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: transfer }))
}

/// PATCH /api/admin/transfers/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTransfer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let transfer = TransferRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(transfer_id = id, user_id = admin.user_id, "Transfer updated");

    Ok(Json(DataResponse { data: transfer }))
}

/// DELETE /api/admin/transfers/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TransferRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(transfer_id = id, user_id = admin.user_id, "Transfer deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Transfer",
        id,
    })
}
