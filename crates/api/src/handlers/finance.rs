//! Handlers for the admin finance reports and overview.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use scriptum_core::error::CoreError;
use scriptum_db::models::finance::DateRange;
use scriptum_db::repositories::{EmployeeRepo, FinanceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/finance/summary?from=&to=
///
/// Cash totals for the period (inclusive dates) plus the current
/// outstanding receivables.
pub async fn summary(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> AppResult<impl IntoResponse> {
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(AppError::Core(CoreError::Validation(format!(
                "'from' ({from}) must not be after 'to' ({to})"
            ))));
        }
    }

    let summary = FinanceRepo::summary(&state.pool, range).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/admin/finance/employees
pub async fn employee_balances(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let balances = EmployeeRepo::balances(&state.pool).await?;
    Ok(Json(DataResponse { data: balances }))
}

/// GET /api/admin/overview
pub async fn overview(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let overview = FinanceRepo::overview(&state.pool).await?;
    Ok(Json(DataResponse { data: overview }))
}
