//! Handlers for `/dashboard`, the employee's own view.
//!
//! Every handler takes [`RequireEmployee`], so the caller is always linked to
//! an active employee and only ever sees their own orders and money.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use scriptum_core::error::CoreError;
use scriptum_core::order::{employee_may_set, OrderStatus};
use scriptum_core::types::{DbId, Money, Timestamp};
use scriptum_core::validation::blank_to_none;
use scriptum_db::models::finance::DateRange;
use scriptum_db::models::order::{ChangeOrderStatus, Order, OrderEvent, OrderFilter};
use scriptum_db::models::transfer::TransferFilter;
use scriptum_db::repositories::{EmployeeRepo, OrderRepo, TransferRepo};

use super::orders::{expect_updated, find_order, order_not_found, parse_status_filter};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// `?status=` filter for the assigned-orders list.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardOrderParams {
    pub status: Option<String>,
}

/// What the assignee sees of an order. Pricing beyond their own share stays
/// in the back office.
#[derive(Debug, Serialize)]
pub struct DashboardOrder {
    pub order_number: String,
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: String,
    pub employee_share: Money,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub events: Vec<OrderEvent>,
}

impl DashboardOrder {
    fn new(order: Order, events: Vec<OrderEvent>) -> Self {
        Self {
            order_number: order.order_number(),
            id: order.id,
            title: order.title,
            description: order.description,
            deadline: order.deadline,
            status: order.status,
            employee_share: order.employee_share,
            notes: order.notes,
            created_at: order.created_at,
            events,
        }
    }
}

/// GET /api/dashboard/orders
pub async fn list_orders(
    me: RequireEmployee,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(params): Query<DashboardOrderParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let filter = OrderFilter {
        status: parse_status_filter(params.status)?,
        employee_id: Some(me.employee.id),
        ..OrderFilter::default()
    };
    let orders = OrderRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/dashboard/orders/{id}
///
/// 404 unless the order is assigned to the caller.
pub async fn get_order(
    me: RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = find_assigned(&state, id, me.employee.id).await?;
    let events = OrderRepo::list_events(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: DashboardOrder::new(order, events),
    }))
}

/// POST /api/dashboard/orders/{id}/status
///
/// The assignee may only start work and hand it over
/// (`ASSIGNED -> IN_PROGRESS`, `IN_PROGRESS | REVISION -> DELIVERED`).
pub async fn change_status(
    me: RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangeOrderStatus>,
) -> AppResult<impl IntoResponse> {
    let target = OrderStatus::from_str_db(input.status.trim())?;
    let order = find_assigned(&state, id, me.employee.id).await?;
    let current = OrderStatus::from_str_db(&order.status)?;

    if !employee_may_set(current, target) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Employees cannot move an order from {current} to {target}"
        ))));
    }

    let note = blank_to_none(input.note);
    let updated = expect_updated(
        OrderRepo::transition(
            &state.pool,
            id,
            current,
            target,
            Some(me.user.user_id),
            note.as_deref(),
        )
        .await?,
        id,
    )?;

    tracing::info!(
        order_id = id,
        employee_id = me.employee.id,
        from = %current,
        to = %target,
        user_id = me.user.user_id,
        "Order status changed by assignee",
    );

    let events = OrderRepo::list_events(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: DashboardOrder::new(updated, events),
    }))
}

/// GET /api/dashboard/referrals
///
/// Orders that came in through the caller's referral code.
pub async fn list_referrals(
    me: RequireEmployee,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let referrals = OrderRepo::list_referrals(&state.pool, me.employee.id, limit, offset).await?;
    Ok(Json(DataResponse { data: referrals }))
}

/// GET /api/dashboard/earnings
pub async fn earnings(
    me: RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let balance = EmployeeRepo::balance(&state.pool, me.employee.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: me.employee.id,
        }))?;
    Ok(Json(DataResponse { data: balance }))
}

/// GET /api/dashboard/transfers?from=&to=
pub async fn list_transfers(
    me: RequireEmployee,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(range): Query<DateRange>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    let filter = TransferFilter {
        employee_id: Some(me.employee.id),
        from: range.from,
        to: range.to,
    };
    let transfers = TransferRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: transfers }))
}

async fn find_assigned(state: &AppState, id: DbId, employee_id: DbId) -> AppResult<Order> {
    let order = find_order(&state.pool, id).await?;
    if order.employee_id != Some(employee_id) {
        return Err(order_not_found(id));
    }
    Ok(order)
}
