//! Order lifecycle: status values, the transition table, and order numbers.
//!
//! The status is stored as text in `orders.status`. Every write path parses
//! it back through [`OrderStatus::from_str_db`] and checks the requested move
//! against [`valid_transitions`] before touching the row.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Received, nobody assigned yet.
    Pending,
    /// An employee has been assigned but has not started.
    Assigned,
    InProgress,
    /// Work handed over to the student.
    Delivered,
    /// Student asked for changes after delivery.
    Revision,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 7] = [
        Self::Pending,
        Self::Assigned,
        Self::InProgress,
        Self::Delivered,
        Self::Revision,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Parse a status string from the database or a request body.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid order status '{s}'. Must be one of: {}",
                    Self::ALL.map(|st| st.as_str()).join(", ")
                ))
            })
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Assigned => "ASSIGNED",
            Self::InProgress => "IN_PROGRESS",
            Self::Delivered => "DELIVERED",
            Self::Revision => "REVISION",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        valid_transitions(*self).is_empty()
    }

    /// Payments may be recorded against any order that was not cancelled.
    pub fn accepts_payments(&self) -> bool {
        *self != Self::Cancelled
    }

    /// Whether the assignee may be set or replaced in this status.
    pub fn allows_assignment(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Assigned | Self::InProgress | Self::Revision
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_db(s)
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Returns the set of statuses that `from` may transition to.
pub fn valid_transitions(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        Pending => &[Assigned, Cancelled],
        Assigned => &[InProgress, Pending, Cancelled],
        InProgress => &[Delivered, Cancelled],
        Delivered => &[Revision, Completed],
        Revision => &[Delivered, Cancelled],
        Completed | Cancelled => &[],
    }
}

/// Whether `from -> to` appears in the transition table.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(current: OrderStatus, next: OrderStatus) -> Result<(), CoreError> {
    if can_transition(current, next) {
        return Ok(());
    }
    let allowed: Vec<&str> = valid_transitions(current)
        .iter()
        .map(OrderStatus::as_str)
        .collect();
    Err(CoreError::Conflict(format!(
        "Cannot move order from {current} to {next}. Allowed: [{}]",
        allowed.join(", ")
    )))
}

/// Transitions the assigned employee may drive from the dashboard.
pub fn employee_may_set(current: OrderStatus, next: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (current, next),
        (Assigned, InProgress) | (InProgress, Delivered) | (Revision, Delivered)
    )
}

// ---------------------------------------------------------------------------
// Order numbers
// ---------------------------------------------------------------------------

/// Prefix of human-facing order numbers.
pub const ORDER_NUMBER_PREFIX: &str = "ORD-";

/// Format an order id as `ORD-000042`.
pub fn format_order_number(id: DbId) -> String {
    format!("{ORDER_NUMBER_PREFIX}{id:06}")
}

/// Parse `ORD-000042` (or a bare `42`) back into an order id.
pub fn parse_order_number(input: &str) -> Result<DbId, CoreError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix(ORDER_NUMBER_PREFIX).unwrap_or(trimmed);
    digits
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::Validation(format!("Invalid order number '{input}'")))
}
