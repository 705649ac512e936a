//! Repository for the `expenses` table.

use sqlx::PgPool;

use scriptum_core::types::DbId;

use crate::models::expense::{CreateExpense, Expense, ExpenseFilter, UpdateExpense};

const COLUMNS: &str = "id, title, category, amount, spent_on, payment_method_id, notes, \
                        created_at, updated_at";

pub struct ExpenseRepo;

impl ExpenseRepo {
    pub async fn create(pool: &PgPool, input: &CreateExpense) -> Result<Expense, sqlx::Error> {
        let query = format!(
            "INSERT INTO expenses (title, category, amount, spent_on, payment_method_id, notes)
             VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(&input.title)
            .bind(&input.category)
            .bind(input.amount)
            .bind(input.spent_on)
            .bind(input.payment_method_id)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses WHERE id = $1");
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List expenses, most recent first. Date bounds are inclusive.
    pub async fn list(
        pool: &PgPool,
        filter: &ExpenseFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM expenses
             WHERE ($1::DATE IS NULL OR spent_on >= $1)
               AND ($2::DATE IS NULL OR spent_on <= $2)
               AND ($3::TEXT IS NULL OR category = $3)
             ORDER BY spent_on DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(filter.from)
            .bind(filter.to)
            .bind(&filter.category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!(
            "UPDATE expenses SET
                title = COALESCE($2, title),
                category = COALESCE($3, category),
                amount = COALESCE($4, amount),
                spent_on = COALESCE($5, spent_on),
                payment_method_id = COALESCE($6, payment_method_id),
                notes = COALESCE($7, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.category)
            .bind(input.amount)
            .bind(input.spent_on)
            .bind(input.payment_method_id)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
