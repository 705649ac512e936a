//! Service catalogue model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptum_core::finance::MAX_AMOUNT;
use scriptum_core::types::{DbId, Money, Timestamp};
use scriptum_core::validation::not_blank;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Default order price in minor units.
    pub base_price: Money,
    pub features: Vec<String>,
    /// Countries the service is marketed in. Empty means everywhere.
    pub countries: Vec<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new service. `slug` is derived from `title` when absent.
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateService {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    pub slug: Option<String>,
    #[validate(length(max = 500))]
    pub summary: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = MAX_AMOUNT))]
    pub base_price: Money,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating an existing service. All fields are optional.
#[derive(Debug, Default, Deserialize, validator::Validate)]
pub struct UpdateService {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 500))]
    pub summary: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = MAX_AMOUNT))]
    pub base_price: Option<Money>,
    pub features: Option<Vec<String>>,
    pub countries: Option<Vec<String>>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
