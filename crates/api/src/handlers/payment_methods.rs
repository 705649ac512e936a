//! Handlers for `/admin/payment-methods`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::types::DbId;
use scriptum_db::models::payment_method::{CreatePaymentMethod, UpdatePaymentMethod};
use scriptum_db::repositories::PaymentMethodRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/admin/payment-methods
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePaymentMethod>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let method = PaymentMethodRepo::create(&state.pool, &input).await?;

    tracing::info!(
        payment_method_id = method.id,
        user_id = admin.user_id,
        "Payment method created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: method })))
}

/// GET /api/admin/payment-methods
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let methods = PaymentMethodRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: methods }))
}

/// GET /api/admin/payment-methods/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let method = PaymentMethodRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: method }))
}

/// PATCH /api/admin/payment-methods/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePaymentMethod>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let method = PaymentMethodRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(payment_method_id = id, user_id = admin.user_id, "Payment method updated");

    Ok(Json(DataResponse { data: method }))
}

/// DELETE /api/admin/payment-methods/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let references = PaymentMethodRepo::count_references(&state.pool, id).await?;
    if references > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Payment method is used by {references} record(s); deactivate it instead"
        ))));
    }

    if !PaymentMethodRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(payment_method_id = id, user_id = admin.user_id, "Payment method deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PaymentMethod",
        id,
    })
}
