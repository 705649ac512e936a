//! Public routes consumed by the marketing site. No authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes merged directly under `/api`.
///
/// ```text
/// GET  /services          -> list_services
/// GET  /services/{slug}   -> get_service
/// GET  /blog              -> list_posts
/// GET  /blog/{slug}       -> get_post
/// GET  /settings          -> get_settings
/// POST /orders            -> submit_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(public::list_services))
        .route("/services/{slug}", get(public::get_service))
        .route("/blog", get(public::list_posts))
        .route("/blog/{slug}", get(public::get_post))
        .route("/settings", get(public::get_settings))
        .route("/orders", post(public::submit_order))
}
