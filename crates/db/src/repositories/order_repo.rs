//! Repository for the `orders` and `order_events` tables.
//!
//! Every write that changes the status goes through a compare-and-set on the
//! current status and records an `order_events` row in the same transaction.

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use scriptum_core::order::{format_order_number, parse_order_number, OrderStatus};
use scriptum_core::types::{DbId, Money};

use crate::models::finance::StatusCount;
use crate::models::order::{
    NewOrder, Order, OrderEvent, OrderFilter, OrderListItem, OrderRevision, OrderSummary,
    OrderWrite, PricingBasis, ReferralOrder,
};

const COLUMNS: &str = "id, student_id, service_id, employee_id, referrer_id, title, description, \
                        deadline, status, total_price, discount, paid_amount, referrer_commission, \
                        employee_share, installments, notes, completed_at, created_at, updated_at";

const EVENT_COLUMNS: &str = "id, order_id, from_status, to_status, changed_by, note, created_at";

/// Provides CRUD and lifecycle operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert an order and its creation event.
    pub async fn create(
        pool: &PgPool,
        input: &NewOrder,
        changed_by: Option<DbId>,
    ) -> Result<Order, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO orders
                (student_id, service_id, employee_id, referrer_id, title, description, deadline,
                 status, total_price, discount, referrer_commission, employee_share,
                 installments, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(input.student_id)
            .bind(input.service_id)
            .bind(input.employee_id)
            .bind(input.referrer_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.deadline)
            .bind(&input.status)
            .bind(input.total_price)
            .bind(input.discount)
            .bind(input.financials.referrer_commission)
            .bind(input.financials.employee_share)
            .bind(Json(&input.installments))
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_event(&mut tx, order.id, None, &order.status, changed_by, None).await?;

        tx.commit().await?;
        Ok(order)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List orders matching `filter`, newest first, with display names joined in.
    ///
    /// A search that reads as an order number (`ORD-000042` or `42`) also
    /// matches that order.
    pub async fn list(
        pool: &PgPool,
        filter: &OrderFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OrderListItem>, sqlx::Error> {
        let searched_id = filter
            .search
            .as_deref()
            .and_then(|term| parse_order_number(term).ok());

        let rows = sqlx::query_as::<_, OrderSummary>(
            "SELECT o.id, o.title, o.status, o.deadline,
                    o.student_id, s.name AS student_name,
                    o.service_id, sv.title AS service_title,
                    o.employee_id, e.name AS employee_name,
                    o.referrer_id,
                    o.total_price, o.discount, o.paid_amount, o.created_at
             FROM orders o
             JOIN students s ON s.id = o.student_id
             JOIN services sv ON sv.id = o.service_id
             LEFT JOIN employees e ON e.id = o.employee_id
             WHERE ($1::TEXT IS NULL OR o.status = $1)
               AND ($2::BIGINT IS NULL OR o.student_id = $2)
               AND ($3::BIGINT IS NULL OR o.employee_id = $3)
               AND ($4::BIGINT IS NULL OR o.referrer_id = $4)
               AND ($5::TEXT IS NULL
                    OR o.title ILIKE '%' || $5 || '%'
                    OR s.name ILIKE '%' || $5 || '%'
                    OR o.id = $8)
             ORDER BY o.created_at DESC, o.id DESC
             LIMIT $6 OFFSET $7",
        )
        .bind(&filter.status)
        .bind(filter.student_id)
        .bind(filter.employee_id)
        .bind(filter.referrer_id)
        .bind(&filter.search)
        .bind(limit)
        .bind(offset)
        .bind(searched_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(OrderListItem::from).collect())
    }

    /// Orders that came in through `referrer_id`, newest first.
    pub async fn list_referrals(
        pool: &PgPool,
        referrer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReferralOrder>, sqlx::Error> {
        let mut rows = sqlx::query_as::<_, ReferralOrder>(
            "SELECT o.id, o.title, o.status, sv.title AS service_title,
                    o.total_price - o.discount AS net_price,
                    o.referrer_commission, o.created_at, o.completed_at
             FROM orders o
             JOIN services sv ON sv.id = o.service_id
             WHERE o.referrer_id = $1
             ORDER BY o.created_at DESC, o.id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(referrer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        for row in &mut rows {
            row.order_number = format_order_number(row.id);
        }
        Ok(rows)
    }

    /// Rewrite details and pricing.
    ///
    /// Applies only while the order still matches `basis` and the paid
    /// amount fits under the new net price; otherwise [`OrderWrite::Stale`].
    /// Terminal orders are never rewritten.
    pub async fn revise(
        pool: &PgPool,
        id: DbId,
        basis: &PricingBasis,
        input: &OrderRevision,
    ) -> Result<OrderWrite, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                service_id = $2,
                referrer_id = $3,
                title = $4,
                description = $5,
                deadline = $6,
                total_price = $7,
                discount = $8,
                referrer_commission = $9,
                employee_share = $10,
                installments = $11,
                notes = $12
             WHERE id = $1
               AND paid_amount <= $13
               AND status NOT IN ('COMPLETED', 'CANCELLED')
               AND {}
             RETURNING {COLUMNS}",
            basis_matches(14)
        );
        let updated = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(input.service_id)
            .bind(input.referrer_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.deadline)
            .bind(input.total_price)
            .bind(input.discount)
            .bind(input.financials.referrer_commission)
            .bind(input.financials.employee_share)
            .bind(Json(&input.installments))
            .bind(&input.notes)
            .bind(input.financials.net_price)
            .bind(basis.status.as_str())
            .bind(basis.employee_id)
            .bind(basis.referrer_id)
            .bind(basis.total_price)
            .bind(basis.discount)
            .bind(basis.referrer_commission)
            .fetch_optional(pool)
            .await?;

        match updated {
            Some(order) => Ok(OrderWrite::Updated(order)),
            None => Self::missing_or_stale(pool, id).await,
        }
    }

    /// Set (or replace) the assignee while the order still matches `basis`,
    /// so `employee_share` is always computed from the stored price.
    ///
    /// A `PENDING` order moves to `ASSIGNED`; otherwise the status is kept.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        basis: &PricingBasis,
        employee_id: DbId,
        employee_share: Money,
        changed_by: Option<DbId>,
    ) -> Result<OrderWrite, sqlx::Error> {
        let expected = basis.status;
        let next = if expected == OrderStatus::Pending {
            OrderStatus::Assigned
        } else {
            expected
        };

        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE orders SET employee_id = $2, employee_share = $3, status = $4
             WHERE id = $1 AND {}
             RETURNING {COLUMNS}",
            basis_matches(5)
        );
        let updated = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(employee_id)
            .bind(employee_share)
            .bind(next.as_str())
            .bind(expected.as_str())
            .bind(basis.employee_id)
            .bind(basis.referrer_id)
            .bind(basis.total_price)
            .bind(basis.discount)
            .bind(basis.referrer_commission)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(order) = updated else {
            tx.rollback().await?;
            return Self::missing_or_stale(pool, id).await;
        };

        if next != expected {
            Self::insert_event(
                &mut tx,
                id,
                Some(expected.as_str()),
                next.as_str(),
                changed_by,
                None,
            )
            .await?;
        }

        tx.commit().await?;
        Ok(OrderWrite::Updated(order))
    }

    /// Remove the assignee from an `ASSIGNED` order, returning it to `PENDING`.
    pub async fn unassign(
        pool: &PgPool,
        id: DbId,
        changed_by: Option<DbId>,
        note: Option<&str>,
    ) -> Result<OrderWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE orders SET employee_id = NULL, employee_share = 0, status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(OrderStatus::Assigned.as_str())
            .bind(OrderStatus::Pending.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(order) = updated else {
            tx.rollback().await?;
            return Self::missing_or_stale(pool, id).await;
        };

        Self::insert_event(
            &mut tx,
            id,
            Some(OrderStatus::Assigned.as_str()),
            OrderStatus::Pending.as_str(),
            changed_by,
            note,
        )
        .await?;

        tx.commit().await?;
        Ok(OrderWrite::Updated(order))
    }

    /// Move an order from `from` to `to` if it is still in `from`.
    ///
    /// The caller validates the transition; this only guards against a
    /// concurrent change. `completed_at` is stamped on completion.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: OrderStatus,
        to: OrderStatus,
        changed_by: Option<DbId>,
        note: Option<&str>,
    ) -> Result<OrderWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE orders SET
                status = $3,
                completed_at = CASE WHEN $3 = 'COMPLETED' THEN NOW() ELSE completed_at END
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(order) = updated else {
            tx.rollback().await?;
            return Self::missing_or_stale(pool, id).await;
        };

        Self::insert_event(&mut tx, id, Some(from.as_str()), to.as_str(), changed_by, note).await?;

        tx.commit().await?;
        Ok(OrderWrite::Updated(order))
    }

    /// Delete an order that has no payments. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM orders WHERE id = $1
               AND NOT EXISTS (SELECT 1 FROM payments WHERE order_id = $1)",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Status history, oldest first.
    pub async fn list_events(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<OrderEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM order_events WHERE order_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, OrderEvent>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Number of orders per status. Statuses without orders are omitted.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM orders GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    async fn insert_event(
        tx: &mut Transaction<'_, Postgres>,
        order_id: DbId,
        from_status: Option<&str>,
        to_status: &str,
        changed_by: Option<DbId>,
        note: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO order_events (order_id, from_status, to_status, changed_by, note)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(order_id)
        .bind(from_status)
        .bind(to_status)
        .bind(changed_by)
        .bind(note)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Distinguish "no such order" from "precondition no longer holds".
    async fn missing_or_stale(pool: &PgPool, id: DbId) -> Result<OrderWrite, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM orders WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(if exists {
            OrderWrite::Stale
        } else {
            OrderWrite::NotFound
        })
    }
}

/// SQL matching a [`PricingBasis`] whose six fields are bound from `$first`
/// on: status, employee_id, referrer_id, total_price, discount,
/// referrer_commission.
fn basis_matches(first: usize) -> String {
    let p = |offset: usize| first + offset;
    format!(
        "status = ${} \
         AND employee_id IS NOT DISTINCT FROM ${}::BIGINT \
         AND referrer_id IS NOT DISTINCT FROM ${}::BIGINT \
         AND total_price = ${} AND discount = ${} AND referrer_commission = ${}",
        p(0),
        p(1),
        p(2),
        p(3),
        p(4),
        p(5)
    )
}
