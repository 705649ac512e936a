//! Domain errors raised by the pure logic in this crate.
//!
//! The API layer maps each variant to an HTTP status; nothing here knows
//! about HTTP.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced row (student, service, order, ...) does not exist.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// Input that can never be accepted: bad money amounts, rates outside
    /// 0..=10000 bps, malformed slugs, unknown statuses.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Input that is well formed but clashes with current state, such as an
    /// illegal order transition or deleting a student who still has orders.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
