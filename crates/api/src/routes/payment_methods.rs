//! Route definitions for `/admin/payment-methods`.

use axum::routing::get;
use axum::Router;

use crate::handlers::payment_methods;
use crate::state::AppState;

/// Payment methods, mounted at `/admin/payment-methods` (admin role).
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
        .route("/", get(payment_methods::list).post(payment_methods::create))
        .route(
            "/{id}",
            get(payment_methods::get_by_id)
                .patch(payment_methods::update)
                .delete(payment_methods::delete),
        )
}
