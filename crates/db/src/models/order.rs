//! Order model, its status-history events, and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use scriptum_core::error::CoreError;
use scriptum_core::finance::{balance_due, OrderFinancials, MAX_AMOUNT};
use scriptum_core::installments::Installment;
use scriptum_core::order::{format_order_number, OrderStatus};
use scriptum_core::types::{DbId, Money, Timestamp};
use scriptum_core::validation::not_blank;

/// A row from the `orders` table.
///
/// `referrer_commission` and `employee_share` are a snapshot taken whenever
/// pricing, the assignee or the referrer changes, so later rate changes do not
/// rewrite history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub student_id: DbId,
    pub service_id: DbId,
    pub employee_id: Option<DbId>,
    pub referrer_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: String,
    pub total_price: Money,
    pub discount: Money,
    pub paid_amount: Money,
    pub referrer_commission: Money,
    pub employee_share: Money,
    pub installments: Json<Vec<Installment>>,
    pub notes: Option<String>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    pub fn order_number(&self) -> String {
        format_order_number(self.id)
    }

    pub fn net_price(&self) -> Money {
        self.total_price - self.discount
    }

    pub fn balance_due(&self) -> Money {
        balance_due(self.net_price(), self.paid_amount)
    }

    pub fn company_profit(&self) -> Money {
        self.net_price() - self.referrer_commission - self.employee_share
    }

    /// Snapshot of the columns a reprice or assignment is computed from.
    pub fn pricing_basis(&self) -> Result<PricingBasis, CoreError> {
        Ok(PricingBasis {
            status: OrderStatus::from_str_db(&self.status)?,
            employee_id: self.employee_id,
            referrer_id: self.referrer_id,
            total_price: self.total_price,
            discount: self.discount,
            referrer_commission: self.referrer_commission,
        })
    }
}

/// The state of an order that a pricing decision was made against.
///
/// [`crate::repositories::OrderRepo::revise`] and
/// [`crate::repositories::OrderRepo::assign`] only write while the row still
/// matches, so a concurrent assignment, status move or reprice turns the
/// write into [`OrderWrite::Stale`] instead of storing numbers computed for
/// a different order state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingBasis {
    pub status: OrderStatus,
    pub employee_id: Option<DbId>,
    pub referrer_id: Option<DbId>,
    pub total_price: Money,
    pub discount: Money,
    pub referrer_commission: Money,
}

/// Order row joined with the display names used by list views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderSummary {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub deadline: Option<NaiveDate>,
    pub student_id: DbId,
    pub student_name: String,
    pub service_id: DbId,
    pub service_title: String,
    pub employee_id: Option<DbId>,
    pub employee_name: Option<String>,
    pub referrer_id: Option<DbId>,
    pub total_price: Money,
    pub discount: Money,
    pub paid_amount: Money,
    pub created_at: Timestamp,
}

/// List entry with the human-facing order number attached.
#[derive(Debug, Clone, Serialize)]
pub struct OrderListItem {
    pub order_number: String,
    #[serde(flatten)]
    pub order: OrderSummary,
}

impl From<OrderSummary> for OrderListItem {
    fn from(order: OrderSummary) -> Self {
        Self {
            order_number: format_order_number(order.id),
            order,
        }
    }
}

/// An order as seen by the employee who referred it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReferralOrder {
    #[sqlx(skip)]
    pub order_number: String,
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub service_title: String,
    pub net_price: Money,
    pub referrer_commission: Money,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// Filters accepted by the order list queries.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub student_id: Option<DbId>,
    pub employee_id: Option<DbId>,
    pub referrer_id: Option<DbId>,
    /// Matches the order title or the student name (case-insensitive).
    pub search: Option<String>,
}

/// Admin request body for `POST /admin/orders`.
///
/// `total_price` defaults to the service's base price.
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateOrder {
    pub student_id: DbId,
    pub service_id: DbId,
    pub employee_id: Option<DbId>,
    pub referrer_id: Option<DbId>,
    #[validate(length(min = 1, max = 300), custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[validate(range(min = 0, max = MAX_AMOUNT))]
    pub total_price: Option<Money>,
    #[validate(range(min = 0, max = MAX_AMOUNT))]
    pub discount: Option<Money>,
    #[serde(default)]
    pub installments: Vec<Installment>,
    pub notes: Option<String>,
}

/// Admin request body for `PATCH /admin/orders/{id}`. All fields are optional.
#[derive(Debug, Default, Clone, Deserialize, validator::Validate)]
pub struct UpdateOrder {
    pub service_id: Option<DbId>,
    #[validate(length(min = 1, max = 300), custom(function = "not_blank"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[validate(range(min = 0, max = MAX_AMOUNT))]
    pub total_price: Option<Money>,
    #[validate(range(min = 0, max = MAX_AMOUNT))]
    pub discount: Option<Money>,
    pub referrer_id: Option<DbId>,
    /// Remove the referrer (and their commission) from the order.
    #[serde(default)]
    pub clear_referrer: bool,
    pub installments: Option<Vec<Installment>>,
    pub notes: Option<String>,
}

/// Fully resolved values for inserting an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub student_id: DbId,
    pub service_id: DbId,
    pub employee_id: Option<DbId>,
    pub referrer_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: String,
    pub total_price: Money,
    pub discount: Money,
    pub financials: OrderFinancials,
    pub installments: Vec<Installment>,
    pub notes: Option<String>,
}

/// Fully resolved values for rewriting an existing order's details and pricing.
#[derive(Debug, Clone)]
pub struct OrderRevision {
    pub service_id: DbId,
    pub referrer_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub total_price: Money,
    pub discount: Money,
    pub financials: OrderFinancials,
    pub installments: Vec<Installment>,
    pub notes: Option<String>,
}

/// Request body for status changes.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeOrderStatus {
    pub status: String,
    pub note: Option<String>,
}

/// Request body for `POST /admin/orders/{id}/assign`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignOrder {
    pub employee_id: DbId,
}

/// A row from the `order_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderEvent {
    pub id: DbId,
    pub order_id: DbId,
    /// `None` for the creation event.
    pub from_status: Option<String>,
    pub to_status: String,
    pub changed_by: Option<DbId>,
    pub note: Option<String>,
    pub created_at: Timestamp,
}

/// Public order intake submitted from the marketing site.
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct OrderIntake {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(length(max = 200))]
    pub university: Option<String>,
    pub service_id: DbId,
    #[validate(length(min = 1, max = 300), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[validate(length(max = 32))]
    pub referral_code: Option<String>,
}

/// Response to a successful intake.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReceipt {
    pub order_number: String,
    pub status: String,
}

/// Outcome of a compare-and-set write against an order.
#[derive(Debug)]
pub enum OrderWrite {
    Updated(Order),
    NotFound,
    /// The row exists but no longer satisfies the write's precondition.
    Stale,
}
