//! Payouts from the company to employees.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptum_core::finance::MAX_AMOUNT;
use scriptum_core::types::{DbId, Money, Timestamp};

/// A row from the `transfers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transfer {
    pub id: DbId,
    pub employee_id: DbId,
    pub amount: Money,
    pub payment_method_id: Option<DbId>,
    pub transferred_at: Timestamp,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateTransfer {
    pub employee_id: DbId,
    #[validate(range(min = 1, max = MAX_AMOUNT))]
    pub amount: Money,
    pub payment_method_id: Option<DbId>,
    pub transferred_at: Option<Timestamp>,
    #[validate(length(max = 200))]
    pub reference: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, validator::Validate)]
pub struct UpdateTransfer {
    #[validate(range(min = 1, max = MAX_AMOUNT))]
    pub amount: Option<Money>,
    pub payment_method_id: Option<DbId>,
    pub transferred_at: Option<Timestamp>,
    #[validate(length(max = 200))]
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// Filters for the transfer list.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TransferFilter {
    pub employee_id: Option<DbId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
