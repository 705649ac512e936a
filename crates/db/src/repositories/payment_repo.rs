//! Repository for the `payments` table.
//!
//! Recording or removing a payment locks the order row so concurrent
//! payments against the same order are serialized and `paid_amount` never
//! drifts from the sum of its payments.

use sqlx::PgPool;

use scriptum_core::finance::balance_due;
use scriptum_core::order::OrderStatus;
use scriptum_core::types::{DbId, Money};

use crate::models::payment::{CreatePayment, Payment, PaymentOutcome};

const COLUMNS: &str = "id, order_id, payment_method_id, amount, paid_at, reference, note, \
                        recorded_by, created_at, updated_at";

pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a payment if it fits within the order's remaining balance.
    pub async fn record(
        pool: &PgPool,
        order_id: DbId,
        input: &CreatePayment,
        recorded_by: Option<DbId>,
    ) -> Result<PaymentOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(String, Money, Money, Money)> = sqlx::query_as(
            "SELECT status, total_price, discount, paid_amount FROM orders
             WHERE id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((status, total_price, discount, paid_amount)) = locked else {
            tx.rollback().await?;
            return Ok(PaymentOutcome::OrderNotFound);
        };

        if status == OrderStatus::Cancelled.as_str() {
            tx.rollback().await?;
            return Ok(PaymentOutcome::OrderCancelled);
        }

        let remaining = balance_due(total_price - discount, paid_amount);
        if input.amount > remaining {
            tx.rollback().await?;
            return Ok(PaymentOutcome::ExceedsBalance {
                balance_due: remaining,
            });
        }

        let query = format!(
            "INSERT INTO payments
                (order_id, payment_method_id, amount, paid_at, reference, note, recorded_by)
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let payment = sqlx::query_as::<_, Payment>(&query)
            .bind(order_id)
            .bind(input.payment_method_id)
            .bind(input.amount)
            .bind(input.paid_at)
            .bind(&input.reference)
            .bind(&input.note)
            .bind(recorded_by)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE orders SET paid_amount = paid_amount + $2 WHERE id = $1")
            .bind(order_id)
            .bind(input.amount)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(PaymentOutcome::Recorded(payment))
    }

    /// Payments on an order, oldest first.
    pub async fn list_for_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE order_id = $1 ORDER BY paid_at, id"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a payment and give its amount back to the order's balance.
    ///
    /// Returns the deleted payment, or `None` if it does not belong to the order.
    pub async fn delete(
        pool: &PgPool,
        order_id: DbId,
        payment_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM orders WHERE id = $1 FOR UPDATE")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "DELETE FROM payments WHERE id = $1 AND order_id = $2 RETURNING {COLUMNS}"
        );
        let deleted = sqlx::query_as::<_, Payment>(&query)
            .bind(payment_id)
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(payment) = deleted else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("UPDATE orders SET paid_amount = paid_amount - $2 WHERE id = $1")
            .bind(order_id)
            .bind(payment.amount)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(payment))
    }
}
