//! Route definitions for `/admin/transfers`.

use axum::routing::get;
use axum::Router;

use crate::handlers::transfers;
use crate::state::AppState;

/// Transfers, mounted at `/admin/transfers` (admin role).
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(transfers::list).post(transfers::create))
        .route(
            "/{id}",
            get(transfers::get_by_id)
                .patch(transfers::update)
                .delete(transfers::delete),
        )
}
