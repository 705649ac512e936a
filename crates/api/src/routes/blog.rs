//! Route definitions for `/admin/blog`.

use axum::routing::get;
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Blog posts, mounted at `/admin/blog` (admin role).
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
        .route("/", get(blog::list).post(blog::create))
        .route(
            "/{id}",
            get(blog::get_by_id)
                .patch(blog::update)
                .delete(blog::delete),
        )
}
