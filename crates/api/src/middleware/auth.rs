//! `AuthUser`: who is calling, taken from the `session` cookie.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use chrono::Utc;

use scriptum_core::error::CoreError;
use scriptum_core::roles::ROLE_ADMIN;
use scriptum_core::types::DbId;
use scriptum_db::repositories::UserRepo;

use crate::auth::session::{decode_session_token, session_from_cookie_header};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The caller behind a valid session. The `users` row is re-read per
/// request, so a deactivation or role change applies on the next call.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    /// `"admin"` or `"staff"`.
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(session_from_cookie_header)
            .ok_or_else(|| unauthorized("Not signed in"))?;

        let user_id = decode_session_token(&token, &state.config.session, Utc::now())
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected session cookie");
                unauthorized("Invalid or expired session")
            })?;

        resolve_user(state, user_id).await
    }
}

async fn resolve_user(state: &AppState, user_id: DbId) -> AppResult<AuthUser> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| unauthorized("User no longer exists"))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    Ok(AuthUser {
        user_id: user.id,
        username: user.username,
        role: user.role,
    })
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}
