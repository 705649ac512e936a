//! Payments received against orders.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptum_core::finance::MAX_AMOUNT;
use scriptum_core::types::{DbId, Money, Timestamp};

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub order_id: DbId,
    pub payment_method_id: Option<DbId>,
    pub amount: Money,
    pub paid_at: Timestamp,
    pub reference: Option<String>,
    pub note: Option<String>,
    pub recorded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a payment. `paid_at` defaults to now.
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreatePayment {
    #[validate(range(min = 1, max = MAX_AMOUNT))]
    pub amount: Money,
    pub payment_method_id: Option<DbId>,
    pub paid_at: Option<Timestamp>,
    #[validate(length(max = 200))]
    pub reference: Option<String>,
    pub note: Option<String>,
}

/// Result of trying to record a payment under the order row lock.
#[derive(Debug)]
pub enum PaymentOutcome {
    Recorded(Payment),
    OrderNotFound,
    OrderCancelled,
    /// The amount would push the paid total past the net price.
    ExceedsBalance { balance_due: Money },
}
