//! Aggregate queries behind the finance report and the admin overview.
//!
//! Date ranges are inclusive on both ends. Timestamp columns compare against
//! `to + 1 day` so the whole last day is covered.

use sqlx::PgPool;

use crate::models::finance::{DateRange, FinanceSummary, Overview};
use crate::repositories::{EmployeeRepo, OrderRepo, StudentRepo};

pub struct FinanceRepo;

impl FinanceRepo {
    pub async fn summary(pool: &PgPool, range: DateRange) -> Result<FinanceSummary, sqlx::Error> {
        sqlx::query_as::<_, FinanceSummary>(
            "WITH
             revenue AS (
                SELECT COALESCE(SUM(amount), 0)::BIGINT AS total FROM payments
                WHERE ($1::DATE IS NULL OR paid_at >= $1::DATE)
                  AND ($2::DATE IS NULL OR paid_at < $2::DATE + 1)
             ),
             spent AS (
                SELECT COALESCE(SUM(amount), 0)::BIGINT AS total FROM expenses
                WHERE ($1::DATE IS NULL OR spent_on >= $1::DATE)
                  AND ($2::DATE IS NULL OR spent_on <= $2::DATE)
             ),
             paid_out AS (
                SELECT COALESCE(SUM(amount), 0)::BIGINT AS total FROM transfers
                WHERE ($1::DATE IS NULL OR transferred_at >= $1::DATE)
                  AND ($2::DATE IS NULL OR transferred_at < $2::DATE + 1)
             ),
             earned AS (
                SELECT COALESCE(SUM(referrer_commission), 0)::BIGINT AS commissions,
                       COALESCE(SUM(employee_share), 0)::BIGINT AS shares
                FROM orders
                WHERE status = 'COMPLETED'
                  AND ($1::DATE IS NULL OR completed_at >= $1::DATE)
                  AND ($2::DATE IS NULL OR completed_at < $2::DATE + 1)
             ),
             receivable AS (
                SELECT COALESCE(SUM(total_price - discount - paid_amount), 0)::BIGINT AS total
                FROM orders WHERE status <> 'CANCELLED'
             )
             SELECT revenue.total AS revenue_collected,
                    spent.total AS expenses_total,
                    paid_out.total AS transfers_total,
                    earned.commissions AS commissions_earned,
                    earned.shares AS employee_shares_earned,
                    receivable.total AS outstanding_receivables,
                    revenue.total - spent.total - paid_out.total AS net_cash
             FROM revenue, spent, paid_out, earned, receivable",
        )
        .bind(range.from)
        .bind(range.to)
        .fetch_one(pool)
        .await
    }

    pub async fn overview(pool: &PgPool) -> Result<Overview, sqlx::Error> {
        let orders_by_status = OrderRepo::count_by_status(pool).await?;
        let student_count = StudentRepo::count(pool).await?;
        let active_employee_count = EmployeeRepo::count_active(pool).await?;
        Ok(Overview {
            orders_by_status,
            student_count,
            active_employee_count,
        })
    }
}
