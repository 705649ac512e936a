//! Route definitions for `/admin/finance`.

use axum::routing::get;
use axum::Router;

use crate::handlers::finance;
use crate::state::AppState;

/// Finance reports, mounted at `/admin/finance` (admin role).
///
/// ```text
/// GET /summary?from=&to=   -> summary
/// GET /employees           -> employee_balances
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(finance::summary))
        .route("/employees", get(finance::employee_balances))
}
