//! Read models for finance reports and the admin overview.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptum_core::types::Money;

/// Optional inclusive date range used by the finance reports.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Cash and accrual totals for a period.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FinanceSummary {
    /// Payments received in the period.
    pub revenue_collected: Money,
    pub expenses_total: Money,
    pub transfers_total: Money,
    /// Referrer commissions of orders completed in the period.
    pub commissions_earned: Money,
    /// Employee shares of orders completed in the period.
    pub employee_shares_earned: Money,
    /// Unpaid balance across all open orders (not limited to the period).
    pub outstanding_receivables: Money,
    /// `revenue_collected - expenses_total - transfers_total`.
    pub net_cash: Money,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Headline numbers for the admin home page.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub orders_by_status: Vec<StatusCount>,
    pub student_count: i64,
    pub active_employee_count: i64,
}
