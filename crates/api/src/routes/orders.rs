//! Route definitions for `/admin/orders`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{order_payments, orders};
use crate::state::AppState;

/// Orders, their lifecycle and their payments, mounted at `/admin/orders`.
///
/// ```text
/// GET    /                               -> list
/// POST   /                               -> create
/// GET    /{id}                           -> get_by_id
/// PATCH  /{id}                           -> update
/// DELETE /{id}                           -> delete
/// POST   /{id}/assign                    -> assign
/// POST   /{id}/unassign                  -> unassign
/// POST   /{id}/status                    -> change_status
/// GET    /{id}/events                    -> list_events
/// GET    /{id}/payments                  -> order_payments::list
/// POST   /{id}/payments                  -> order_payments::record
/// DELETE /{id}/payments/{payment_id}     -> order_payments::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route(
            "/{id}",
            get(orders::get_by_id)
                .patch(orders::update)
                .delete(orders::delete),
        )
        .route("/{id}/assign", post(orders::assign))
        .route("/{id}/unassign", post(orders::unassign))
        .route("/{id}/status", post(orders::change_status))
        .route("/{id}/events", get(orders::list_events))
        .route(
            "/{id}/payments",
            get(order_payments::list).post(order_payments::record),
        )
        .route(
            "/{id}/payments/{payment_id}",
            delete(order_payments::delete),
        )
}
