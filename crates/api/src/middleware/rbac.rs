//! Guards layered on top of [`AuthUser`]. A signed-in caller who fails a
//! guard gets 403; an anonymous one still gets 401 from `AuthUser`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use scriptum_core::error::CoreError;
use scriptum_db::models::employee::Employee;
use scriptum_db::repositories::EmployeeRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Everything under `/api/admin`.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Any role. Used where the handler never looks at the caller.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}

/// A staff or admin account whose linked employee is active; the
/// dashboard scopes every query to `employee.id`.
pub struct RequireEmployee {
    pub user: AuthUser,
    pub employee: Employee,
}

impl FromRequestParts<AppState> for RequireEmployee {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let employee = EmployeeRepo::find_by_user_id(&state.pool, user.user_id)
            .await?
            .filter(|e| e.is_active)
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "No active employee profile is linked to this account".into(),
                ))
            })?;
        Ok(RequireEmployee { user, employee })
    }
}
