//! Business expenses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptum_core::finance::MAX_AMOUNT;
use scriptum_core::types::{DbId, Money, Timestamp};
use scriptum_core::validation::not_blank;

/// A row from the `expenses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expense {
    pub id: DbId,
    pub title: String,
    pub category: Option<String>,
    pub amount: Money,
    pub spent_on: NaiveDate,
    pub payment_method_id: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateExpense {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(range(min = 1, max = MAX_AMOUNT))]
    pub amount: Money,
    pub spent_on: Option<NaiveDate>,
    pub payment_method_id: Option<DbId>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, validator::Validate)]
pub struct UpdateExpense {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(range(min = 1, max = MAX_AMOUNT))]
    pub amount: Option<Money>,
    pub spent_on: Option<NaiveDate>,
    pub payment_method_id: Option<DbId>,
    pub notes: Option<String>,
}

/// Filters for the expense list.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExpenseFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<String>,
}
