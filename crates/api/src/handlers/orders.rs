//! Handlers for `/admin/orders`.
//!
//! Pricing is resolved here from the service, the parties involved and the
//! settings row, then handed to the repository as a fully computed
//! snapshot. Status moves are validated against the transition table before
//! the compare-and-set write; a lost race surfaces as 409.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use validator::Validate;

use scriptum_core::error::CoreError;
use scriptum_core::finance::{
    apply_bps, price_order, validate_paid_within_net, OrderFinancials, PricingInput,
};
use scriptum_core::installments::{next_due, schedule, validate_plan, InstallmentStatus};
use scriptum_core::order::{validate_transition, OrderStatus};
use scriptum_core::types::{BasisPoints, DbId, Money};
use scriptum_core::validation::{blank_to_none, validate_required};
use scriptum_db::models::employee::Employee;
use scriptum_db::models::order::{
    AssignOrder, ChangeOrderStatus, CreateOrder, NewOrder, Order, OrderEvent, OrderFilter,
    OrderRevision, OrderWrite, UpdateOrder,
};
use scriptum_db::models::payment::Payment;
use scriptum_db::models::settings::Settings;
use scriptum_db::repositories::{
    EmployeeRepo, OrderRepo, PaymentRepo, ServiceRepo, SettingsRepo, StudentRepo,
};
use scriptum_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_TITLE_LENGTH: usize = 300;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Full order view used by the admin detail page.
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    pub order_number: String,
    #[serde(flatten)]
    pub order: Order,
    pub financials: OrderFinancials,
    pub balance_due: Money,
    pub schedule: Vec<InstallmentStatus>,
    pub next_due: Option<InstallmentStatus>,
    pub payments: Vec<Payment>,
    pub events: Vec<OrderEvent>,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/admin/orders
///
/// `total_price` defaults to the service's base price. An order created
/// with an employee starts in `ASSIGNED`, otherwise `PENDING`.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    StudentRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: input.student_id,
        }))?;
    let service = ServiceRepo::find_by_id(&state.pool, input.service_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id: input.service_id,
        }))?;
    let settings = SettingsRepo::get(&state.pool).await?;

    let employee_rate = match input.employee_id {
        Some(id) => Some(employee_rate(&load_assignee(&state.pool, id).await?, &settings)),
        None => None,
    };
    let referrer_rate = match input.referrer_id {
        Some(id) => Some(referrer_rate(&load_referrer(&state.pool, id).await?, &settings)),
        None => None,
    };

    let total_price = input.total_price.unwrap_or(service.base_price);
    let discount = input.discount.unwrap_or(0);
    let financials = price_order(PricingInput {
        total_price,
        discount,
        referrer_rate_bps: referrer_rate,
        employee_rate_bps: employee_rate,
    })?;
    validate_plan(&input.installments, financials.net_price, settings.max_installments)?;

    let status = if input.employee_id.is_some() {
        OrderStatus::Assigned
    } else {
        OrderStatus::Pending
    };

    let new_order = NewOrder {
        student_id: input.student_id,
        service_id: input.service_id,
        employee_id: input.employee_id,
        referrer_id: input.referrer_id,
        title: validate_required("title", &input.title, MAX_TITLE_LENGTH)?,
        description: input.description,
        deadline: input.deadline,
        status: status.as_str().to_string(),
        total_price,
        discount,
        financials,
        installments: input.installments,
        notes: input.notes,
    };
    let order = OrderRepo::create(&state.pool, &new_order, Some(admin.user_id)).await?;

    tracing::info!(
        order_id = order.id,
        status = %order.status,
        net_price = financials.net_price,
        user_id = admin.user_id,
        "Order created",
    );

    let detail = load_detail(&state.pool, order).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/admin/orders
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(mut filter): Query<OrderFilter>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = page.resolve();
    filter.status = parse_status_filter(filter.status)?;
    filter.search = blank_to_none(filter.search);

    let orders = OrderRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/admin/orders/{id}
///
/// Order with computed financials, installment schedule, payments and
/// status history.
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = find_order(&state.pool, id).await?;
    let detail = load_detail(&state.pool, order).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/admin/orders/{id}
///
/// Re-prices the order from the merged fields. The write only applies if
/// what has been paid still fits under the new net price.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrder>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let order = find_order(&state.pool, id).await?;
    let basis = order.pricing_basis()?;
    if basis.status.is_terminal() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A {} order can no longer be edited",
            basis.status
        ))));
    }

    let service_id = input.service_id.unwrap_or(order.service_id);
    if service_id != order.service_id {
        ServiceRepo::find_by_id(&state.pool, service_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Service",
                id: service_id,
            }))?;
    }

    let settings = SettingsRepo::get(&state.pool).await?;

    let referrer_id = if input.clear_referrer {
        None
    } else {
        input.referrer_id.or(order.referrer_id)
    };
    let referrer_rate = match referrer_id {
        // A newly chosen referrer must be an active referrer; an existing one
        // keeps earning even if deactivated since.
        Some(rid) if Some(rid) != order.referrer_id => {
            Some(referrer_rate(&load_referrer(&state.pool, rid).await?, &settings))
        }
        Some(rid) => {
            let referrer = EmployeeRepo::find_by_id(&state.pool, rid)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Employee",
                    id: rid,
                }))?;
            Some(referrer_rate(&referrer, &settings))
        }
        None => None,
    };
    let employee_rate = match order.employee_id {
        Some(eid) => {
            let employee = EmployeeRepo::find_by_id(&state.pool, eid)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Employee",
                    id: eid,
                }))?;
            Some(employee_rate(&employee, &settings))
        }
        None => None,
    };

    let total_price = input.total_price.unwrap_or(order.total_price);
    let discount = input.discount.unwrap_or(order.discount);
    let financials = price_order(PricingInput {
        total_price,
        discount,
        referrer_rate_bps: referrer_rate,
        employee_rate_bps: employee_rate,
    })?;
    validate_paid_within_net(order.paid_amount, financials.net_price)?;

    let installments = input.installments.unwrap_or_else(|| order.installments.0.clone());
    validate_plan(&installments, financials.net_price, settings.max_installments)?;

    let revision = OrderRevision {
        service_id,
        referrer_id,
        title: match input.title {
            Some(title) => validate_required("title", &title, MAX_TITLE_LENGTH)?,
            None => order.title,
        },
        description: input.description.or(order.description),
        deadline: input.deadline.or(order.deadline),
        total_price,
        discount,
        financials,
        installments,
        notes: input.notes.or(order.notes),
    };

    let updated = expect_updated(
        OrderRepo::revise(&state.pool, id, &basis, &revision).await?,
        id,
    )?;

    tracing::info!(
        order_id = id,
        net_price = financials.net_price,
        user_id = admin.user_id,
        "Order updated",
    );

    let detail = load_detail(&state.pool, updated).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/admin/orders/{id}
///
/// Only orders without payments can be deleted; cancel the others.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if OrderRepo::delete(&state.pool, id).await? {
        tracing::info!(order_id = id, user_id = admin.user_id, "Order deleted");
        return Ok(StatusCode::NO_CONTENT);
    }

    find_order(&state.pool, id).await?;
    Err(AppError::Core(CoreError::Conflict(
        "Order has payments and cannot be deleted; cancel it instead".into(),
    )))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/admin/orders/{id}/assign
///
/// Sets or replaces the assignee. A `PENDING` order becomes `ASSIGNED`.
/// The employee share is recomputed for the new assignee.
pub async fn assign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignOrder>,
) -> AppResult<impl IntoResponse> {
    let order = find_order(&state.pool, id).await?;
    let basis = order.pricing_basis()?;
    if !basis.status.allows_assignment() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot assign an employee to a {} order",
            basis.status
        ))));
    }

    let employee = load_assignee(&state.pool, input.employee_id).await?;
    let settings = SettingsRepo::get(&state.pool).await?;
    let share = apply_bps(
        order.net_price() - order.referrer_commission,
        employee_rate(&employee, &settings),
    )?;

    let updated = expect_updated(
        OrderRepo::assign(&state.pool, id, &basis, employee.id, share, Some(admin.user_id))
            .await?,
        id,
    )?;

    tracing::info!(
        order_id = id,
        employee_id = employee.id,
        user_id = admin.user_id,
        "Order assigned",
    );

    let detail = load_detail(&state.pool, updated).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/admin/orders/{id}/unassign
///
/// Only `ASSIGNED` orders can be unassigned; they return to `PENDING`.
pub async fn unassign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let updated = expect_updated(
        OrderRepo::unassign(&state.pool, id, Some(admin.user_id), None).await?,
        id,
    )?;

    tracing::info!(order_id = id, user_id = admin.user_id, "Order unassigned");

    let detail = load_detail(&state.pool, updated).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/admin/orders/{id}/status
///
/// Moves along the transition table. `ASSIGNED` is reached through
/// `/assign`; a move back to `PENDING` unassigns the employee.
pub async fn change_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangeOrderStatus>,
) -> AppResult<impl IntoResponse> {
    let target = OrderStatus::from_str_db(input.status.trim())?;
    let order = find_order(&state.pool, id).await?;
    let current = OrderStatus::from_str_db(&order.status)?;
    validate_transition(current, target)?;

    let note = blank_to_none(input.note);
    let outcome = match target {
        OrderStatus::Assigned => {
            return Err(AppError::Core(CoreError::Validation(
                "Use the assign endpoint to assign an employee".into(),
            )))
        }
        OrderStatus::Pending => {
            OrderRepo::unassign(&state.pool, id, Some(admin.user_id), note.as_deref()).await?
        }
        _ => {
            OrderRepo::transition(
                &state.pool,
                id,
                current,
                target,
                Some(admin.user_id),
                note.as_deref(),
            )
            .await?
        }
    };
    let updated = expect_updated(outcome, id)?;

    tracing::info!(
        order_id = id,
        from = %current,
        to = %target,
        user_id = admin.user_id,
        "Order status changed",
    );

    let detail = load_detail(&state.pool, updated).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/admin/orders/{id}/events
pub async fn list_events(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_order(&state.pool, id).await?;
    let events = OrderRepo::list_events(&state.pool, id).await?;
    Ok(Json(DataResponse { data: events }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rate the assignee earns: their own override, else the settings default.
pub(crate) fn employee_rate(employee: &Employee, settings: &Settings) -> BasisPoints {
    employee
        .profit_share_bps
        .unwrap_or(settings.employee_share_bps)
}

/// Rate the referrer earns: their own override, else the settings default.
pub(crate) fn referrer_rate(referrer: &Employee, settings: &Settings) -> BasisPoints {
    referrer
        .commission_rate_bps
        .unwrap_or(settings.referral_commission_bps)
}

pub(crate) async fn find_order(pool: &DbPool, id: DbId) -> AppResult<Order> {
    OrderRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| order_not_found(id))
}

pub(crate) fn order_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Order", id })
}

/// Map a compare-and-set outcome to the updated order or an error.
pub(crate) fn expect_updated(outcome: OrderWrite, id: DbId) -> AppResult<Order> {
    match outcome {
        OrderWrite::Updated(order) => Ok(order),
        OrderWrite::NotFound => Err(order_not_found(id)),
        OrderWrite::Stale => Err(AppError::Core(CoreError::Conflict(
            "Order was changed meanwhile; reload and retry".into(),
        ))),
    }
}

/// Validate an optional `?status=` filter and return it trimmed.
pub(crate) fn parse_status_filter(status: Option<String>) -> AppResult<Option<String>> {
    match blank_to_none(status) {
        Some(s) => Ok(Some(OrderStatus::from_str_db(&s)?.as_str().to_string())),
        None => Ok(None),
    }
}

async fn load_assignee(pool: &DbPool, id: DbId) -> AppResult<Employee> {
    let employee = EmployeeRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;
    if !employee.is_active {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Employee {id} is inactive and cannot be assigned"
        ))));
    }
    Ok(employee)
}

async fn load_referrer(pool: &DbPool, id: DbId) -> AppResult<Employee> {
    let referrer = EmployeeRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;
    if !referrer.is_referrer || !referrer.is_active {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Employee {id} is not an active referrer"
        ))));
    }
    Ok(referrer)
}

async fn load_detail(pool: &DbPool, order: Order) -> AppResult<OrderDetail> {
    let payments = PaymentRepo::list_for_order(pool, order.id).await?;
    let events = OrderRepo::list_events(pool, order.id).await?;

    let schedule = schedule(&order.installments, order.paid_amount, Utc::now().date_naive());
    let next_due = next_due(&schedule).cloned();

    Ok(OrderDetail {
        order_number: order.order_number(),
        financials: OrderFinancials {
            net_price: order.net_price(),
            referrer_commission: order.referrer_commission,
            employee_share: order.employee_share,
            company_profit: order.company_profit(),
        },
        balance_due: order.balance_due(),
        schedule,
        next_due,
        payments,
        events,
        order,
    })
}
