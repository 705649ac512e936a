//! Handlers for `/admin/employees`.
//!
//! Referral codes are stored upper-cased; lookups by code are
//! case-insensitive anyway.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::finance::validate_bps;
use scriptum_core::types::{BasisPoints, DbId};
use scriptum_core::validation::blank_to_none;
use scriptum_db::models::employee::{CreateEmployee, UpdateEmployee};
use scriptum_db::repositories::EmployeeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Filters for `GET /admin/employees`.
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeListParams {
    pub search: Option<String>,
    #[serde(default)]
    pub referrers_only: bool,
    #[serde(default)]
    pub include_inactive: bool,
}

/// POST /api/admin/employees
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateEmployee>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_rates(input.commission_rate_bps, input.profit_share_bps)?;
    input.email = input.email.trim().to_lowercase();
    input.referral_code = normalize_code(input.referral_code);
    require_code_for_referrer(input.is_referrer, input.referral_code.as_deref())?;

    let employee = EmployeeRepo::create(&state.pool, &input).await?;

    tracing::info!(employee_id = employee.id, user_id = admin.user_id, "Employee created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: employee })))
}

/// GET /api/admin/employees
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(params): Query<EmployeeListParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let search = blank_to_none(params.search);
    let employees = EmployeeRepo::list(
        &state.pool,
        search.as_deref(),
        params.referrers_only,
        params.include_inactive,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: employees }))
}

/// GET /api/admin/employees/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: employee }))
}

/// PATCH /api/admin/employees/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateEmployee>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_rates(input.commission_rate_bps, input.profit_share_bps)?;
    input.email = input.email.map(|e| e.trim().to_lowercase());
    input.referral_code = normalize_code(input.referral_code);

    let existing = EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    require_code_for_referrer(
        input.is_referrer.unwrap_or(existing.is_referrer),
        input
            .referral_code
            .as_deref()
            .or(existing.referral_code.as_deref()),
    )?;

    let employee = EmployeeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(employee_id = id, user_id = admin.user_id, "Employee updated");

    Ok(Json(DataResponse { data: employee }))
}

/// DELETE /api/admin/employees/{id}
///
/// Rejected with 409 while orders or transfers point at the employee.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let references = EmployeeRepo::count_references(&state.pool, id).await?;
    if references > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Employee is referenced by {references} order(s) or transfer(s); deactivate instead"
        ))));
    }

    if !EmployeeRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(employee_id = id, user_id = admin.user_id, "Employee deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/employees/{id}/balance
pub async fn balance(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let balance = EmployeeRepo::balance(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: balance }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_rates(
    commission_rate_bps: Option<BasisPoints>,
    profit_share_bps: Option<BasisPoints>,
) -> Result<(), CoreError> {
    if let Some(bps) = commission_rate_bps {
        validate_bps("commission_rate_bps", bps)?;
    }
    if let Some(bps) = profit_share_bps {
        validate_bps("profit_share_bps", bps)?;
    }
    Ok(())
}

fn normalize_code(code: Option<String>) -> Option<String> {
    blank_to_none(code).map(|c| c.trim().to_uppercase())
}

fn require_code_for_referrer(is_referrer: bool, code: Option<&str>) -> Result<(), CoreError> {
    if is_referrer && code.is_none() {
        return Err(CoreError::Validation(
            "A referrer needs a referral_code".into(),
        ));
    }
    Ok(())
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Employee",
        id,
    })
}
