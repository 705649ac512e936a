//! Handlers for `/admin/settings` (the singleton settings row).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use scriptum_core::finance::validate_bps;
use scriptum_core::validation::validate_currency;
use scriptum_db::models::settings::UpdateSettings;
use scriptum_db::repositories::SettingsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/settings
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::get(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PATCH /api/admin/settings
///
/// New rates only affect orders priced afterwards.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<UpdateSettings>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(bps) = input.referral_commission_bps {
        validate_bps("referral_commission_bps", bps)?;
    }
    if let Some(bps) = input.employee_share_bps {
        validate_bps("employee_share_bps", bps)?;
    }
    if let Some(currency) = input.currency.as_mut() {
        *currency = currency.trim().to_uppercase();
        validate_currency(currency)?;
    }

    let settings = SettingsRepo::update(&state.pool, &input).await?;

    tracing::info!(user_id = admin.user_id, "Settings updated");

    Ok(Json(DataResponse { data: settings }))
}
