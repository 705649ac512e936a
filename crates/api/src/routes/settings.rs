//! Route definitions for `/admin/settings`.

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// ```text
/// GET   /   -> get
/// PATCH /   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(settings::get).patch(settings::update))
}
