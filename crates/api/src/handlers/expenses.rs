//! Handlers for `/admin/expenses`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::types::DbId;
use scriptum_core::validation::blank_to_none;
use scriptum_db::models::expense::{CreateExpense, ExpenseFilter, UpdateExpense};
use scriptum_db::repositories::ExpenseRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/admin/expenses
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateExpense>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    input.category = blank_to_none(input.category);

    let expense = ExpenseRepo::create(&state.pool, &input).await?;

    tracing::info!(
        expense_id = expense.id,
        amount = expense.amount,
        user_id = admin.user_id,
        "Expense created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: expense })))
}

/// GET /api/admin/expenses
///
/// `from` and `to` are inclusive dates.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(mut filter): Query<ExpenseFilter>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    filter.category = blank_to_none(filter.category);
    let expenses = ExpenseRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: expenses }))
}

/// GET /api/admin/expenses/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let expense = ExpenseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: expense }))
}

/// PATCH /api/admin/expenses/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExpense>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let expense = ExpenseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(expense_id = id, user_id = admin.user_id, "Expense updated");

    Ok(Json(DataResponse { data: expense }))
}

/// DELETE /api/admin/expenses/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ExpenseRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(expense_id = id, user_id = admin.user_id, "Expense deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Expense",
        id,
    })
}
