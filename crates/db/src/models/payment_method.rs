//! Payment method model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptum_core::types::{DbId, Timestamp};
use scriptum_core::validation::not_blank;

/// A row from the `payment_methods` table (bank account, wallet, ...).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentMethod {
    pub id: DbId,
    pub name: String,
    pub details: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreatePaymentMethod {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: String,
    pub details: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, validator::Validate)]
pub struct UpdatePaymentMethod {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: Option<String>,
    pub details: Option<String>,
    pub is_active: Option<bool>,
}
