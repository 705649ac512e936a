//! Session endpoints, mounted at `/api/auth`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth::{login, logout, me};
use crate::state::AppState;

/// ```text
/// POST /login    username or email + password, sets the `session` cookie
/// POST /logout   clears the cookie
/// GET  /me       current user and linked employee id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/login", post(login))
        .route("/logout", post(logout))
}
