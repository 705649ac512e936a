//! Handlers for `/admin/orders/{id}/payments`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::finance::validate_payment;
use scriptum_core::order::OrderStatus;
use scriptum_core::types::DbId;
use scriptum_db::models::payment::{CreatePayment, PaymentOutcome};
use scriptum_db::repositories::PaymentRepo;

use super::orders::{find_order, order_not_found};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/orders/{id}/payments
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_order(&state.pool, order_id).await?;
    let payments = PaymentRepo::list_for_order(&state.pool, order_id).await?;
    Ok(Json(DataResponse { data: payments }))
}

/// POST /api/admin/orders/{id}/payments
///
/// Checked against the balance up front and again under the order row lock,
/// so concurrent payments cannot overshoot the net price.
pub async fn record(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    Json(input): Json<CreatePayment>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let order = find_order(&state.pool, order_id).await?;
    if !OrderStatus::from_str_db(&order.status)?.accepts_payments() {
        return Err(cancelled());
    }
    validate_payment(order.paid_amount, input.amount, order.net_price())?;

    let payment =
        match PaymentRepo::record(&state.pool, order_id, &input, Some(admin.user_id)).await? {
            PaymentOutcome::Recorded(payment) => payment,
            PaymentOutcome::OrderNotFound => return Err(order_not_found(order_id)),
            PaymentOutcome::OrderCancelled => return Err(cancelled()),
            PaymentOutcome::ExceedsBalance { balance_due } => {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Payment of {} exceeds the remaining balance of {balance_due}",
                    input.amount
                ))))
            }
        };

    tracing::info!(
        order_id,
        payment_id = payment.id,
        amount = payment.amount,
        user_id = admin.user_id,
        "Payment recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: payment })))
}

/// DELETE /api/admin/orders/{id}/payments/{payment_id}
///
/// Removes the payment and gives its amount back to the order balance.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((order_id, payment_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = PaymentRepo::delete(&state.pool, order_id, payment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id: payment_id,
        }))?;

    tracing::info!(
        order_id,
        payment_id,
        amount = removed.amount,
        user_id = admin.user_id,
        "Payment deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}

fn cancelled() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Payments cannot be recorded against a cancelled order".into(),
    ))
}
