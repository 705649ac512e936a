//! Route definitions for `/dashboard` (the employee's own view).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`. The caller must be linked to an active
/// employee.
///
/// ```text
/// GET  /orders               -> list_orders
/// GET  /orders/{id}          -> get_order
/// POST /orders/{id}/status   -> change_status
/// GET  /referrals            -> list_referrals
/// GET  /earnings             -> earnings
/// GET  /transfers            -> list_transfers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(dashboard::list_orders))
        .route("/orders/{id}", get(dashboard::get_order))
        .route("/orders/{id}/status", post(dashboard::change_status))
        .route("/referrals", get(dashboard::list_referrals))
        .route("/earnings", get(dashboard::earnings))
        .route("/transfers", get(dashboard::list_transfers))
}
