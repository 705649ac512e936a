//! Route definitions for `/admin/employees`.

use axum::routing::get;
use axum::Router;

use crate::handlers::employees;
use crate::state::AppState;

/// Employees and referrers, mounted at `/admin/employees` (admin role).
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PATCH  /{id}           -> update
/// DELETE /{id}           -> delete
/// GET    /{id}/balance   -> balance
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employees::list).post(employees::create))
        .route(
            "/{id}",
            get(employees::get_by_id)
                .patch(employees::update)
                .delete(employees::delete),
        )
        .route("/{id}/balance", get(employees::balance))
}
