//! Repository for the `employees` table and employee balances.

use sqlx::PgPool;

use scriptum_core::types::DbId;

use crate::models::employee::{CreateEmployee, Employee, EmployeeBalance, UpdateEmployee};

const COLUMNS: &str = "id, user_id, name, email, phone, position, is_referrer, referral_code, \
                        commission_rate_bps, profit_share_bps, is_active, created_at, updated_at";

/// Earned shares and commissions only count once an order is completed.
const BALANCE_QUERY: &str = "\
    SELECT employee_id, name, earned, commissions, transferred,
           earned + commissions - transferred AS balance
    FROM (
        SELECT e.id AS employee_id,
               e.name,
               COALESCE((SELECT SUM(o.employee_share) FROM orders o
                         WHERE o.employee_id = e.id AND o.status = 'COMPLETED'), 0)::BIGINT
                   AS earned,
               COALESCE((SELECT SUM(o.referrer_commission) FROM orders o
                         WHERE o.referrer_id = e.id AND o.status = 'COMPLETED'), 0)::BIGINT
                   AS commissions,
               COALESCE((SELECT SUM(t.amount) FROM transfers t
                         WHERE t.employee_id = e.id), 0)::BIGINT AS transferred
        FROM employees e
        WHERE ($1::BIGINT IS NULL OR e.id = $1)
    ) b
    ORDER BY name, employee_id";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees
                (user_id, name, email, phone, position, is_referrer, referral_code,
                 commission_rate_bps, profit_share_bps)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.position)
            .bind(input.is_referrer)
            .bind(&input.referral_code)
            .bind(input.commission_rate_bps)
            .bind(input.profit_share_bps)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the employee linked to a login account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE user_id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a referral code to an active referrer (code match is case-insensitive).
    pub async fn find_active_referrer_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees
             WHERE LOWER(referral_code) = LOWER($1) AND is_referrer AND is_active"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        referrers_only: bool,
        include_inactive: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees
             WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
               AND (NOT $2 OR is_referrer)
               AND ($3 OR is_active)
             ORDER BY name, id
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(search)
            .bind(referrers_only)
            .bind(include_inactive)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                user_id = COALESCE($2, user_id),
                name = COALESCE($3, name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                position = COALESCE($6, position),
                is_referrer = COALESCE($7, is_referrer),
                referral_code = COALESCE($8, referral_code),
                commission_rate_bps = COALESCE($9, commission_rate_bps),
                profit_share_bps = COALESCE($10, profit_share_bps),
                is_active = COALESCE($11, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.position)
            .bind(input.is_referrer)
            .bind(&input.referral_code)
            .bind(input.commission_rate_bps)
            .bind(input.profit_share_bps)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an employee. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Orders (as assignee or referrer) plus transfers that point at the employee.
    pub async fn count_references(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM orders WHERE employee_id = $1 OR referrer_id = $1)
                  + (SELECT COUNT(*) FROM transfers WHERE employee_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees WHERE is_active")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Balance of a single employee, or `None` if the id is unknown.
    pub async fn balance(pool: &PgPool, id: DbId) -> Result<Option<EmployeeBalance>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeBalance>(BALANCE_QUERY)
            .bind(Some(id))
            .fetch_optional(pool)
            .await
    }

    /// Balances of every employee, ordered by name.
    pub async fn balances(pool: &PgPool) -> Result<Vec<EmployeeBalance>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeBalance>(BALANCE_QUERY)
            .bind(None::<DbId>)
            .fetch_all(pool)
            .await
    }
}
