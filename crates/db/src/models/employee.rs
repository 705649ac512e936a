//! Employee entity model and DTOs.
//!
//! Employees do the work on orders and, when flagged as referrers, earn a
//! commission on orders that came in through their referral code.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptum_core::types::{BasisPoints, DbId, Money, Timestamp};
use scriptum_core::validation::not_blank;

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    /// Login account used for the dashboard, if any.
    pub user_id: Option<DbId>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub is_referrer: bool,
    pub referral_code: Option<String>,
    /// Overrides the settings-wide referral commission when set.
    pub commission_rate_bps: Option<BasisPoints>,
    /// Overrides the settings-wide employee share when set.
    pub profit_share_bps: Option<BasisPoints>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new employee.
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateEmployee {
    pub user_id: Option<DbId>,
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub position: Option<String>,
    #[serde(default)]
    pub is_referrer: bool,
    #[validate(length(min = 3, max = 32))]
    pub referral_code: Option<String>,
    pub commission_rate_bps: Option<BasisPoints>,
    pub profit_share_bps: Option<BasisPoints>,
}

/// DTO for updating an existing employee. All fields are optional.
#[derive(Debug, Default, Deserialize, validator::Validate)]
pub struct UpdateEmployee {
    pub user_id: Option<DbId>,
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub position: Option<String>,
    pub is_referrer: Option<bool>,
    #[validate(length(min = 3, max = 32))]
    pub referral_code: Option<String>,
    pub commission_rate_bps: Option<BasisPoints>,
    pub profit_share_bps: Option<BasisPoints>,
    pub is_active: Option<bool>,
}

/// What the company owes an employee.
///
/// Only completed orders count toward `earned` and `commissions`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeeBalance {
    pub employee_id: DbId,
    pub name: String,
    pub earned: Money,
    pub commissions: Money,
    pub transferred: Money,
    pub balance: Money,
}
