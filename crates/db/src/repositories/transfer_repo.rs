//! Repository for the `transfers` table.

use sqlx::PgPool;

use scriptum_core::types::DbId;

use crate::models::transfer::{CreateTransfer, Transfer, TransferFilter, UpdateTransfer};

const COLUMNS: &str = "id, employee_id, amount, payment_method_id, transferred_at, reference, \
                        notes, created_at, updated_at";

pub struct TransferRepo;

impl TransferRepo {
    pub async fn create(pool: &PgPool, input: &CreateTransfer) -> Result<Transfer, sqlx::Error> {
        let query = format!(
            "INSERT INTO transfers
                (employee_id, amount, payment_method_id, transferred_at, reference, notes)
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transfer>(&query)
            .bind(input.employee_id)
            .bind(input.amount)
            .bind(input.payment_method_id)
            .bind(input.transferred_at)
            .bind(&input.reference)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Transfer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transfers WHERE id = $1");
        sqlx::query_as::<_, Transfer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List transfers, most recent first. Date bounds are inclusive.
    pub async fn list(
        pool: &PgPool,
        filter: &TransferFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transfer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transfers
             WHERE ($1::BIGINT IS NULL OR employee_id = $1)
               AND ($2::DATE IS NULL OR transferred_at >= $2::DATE)
               AND ($3::DATE IS NULL OR transferred_at < $3::DATE + 1)
             ORDER BY transferred_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Transfer>(&query)
            .bind(filter.employee_id)
            .bind(filter.from)
            .bind(filter.to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTransfer,
    ) -> Result<Option<Transfer>, sqlx::Error> {
        let query = format!(
            "UPDATE transfers SET
                amount = COALESCE($2, amount),
                payment_method_id = COALESCE($3, payment_method_id),
                transferred_at = COALESCE($4, transferred_at),
                reference = COALESCE($5, reference),
                notes = COALESCE($6, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transfer>(&query)
            .bind(id)
            .bind(input.amount)
            .bind(input.payment_method_id)
            .bind(input.transferred_at)
            .bind(&input.reference)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transfers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
