//! Well-known role name constants.
//!
//! These must match the `chk_users_role` constraint in the users migration.

use crate::error::CoreError;

/// Full back-office access.
pub const ROLE_ADMIN: &str = "admin";

/// Staff accounts, usually linked to an employee row for the dashboard.
pub const ROLE_STAFF: &str = "staff";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STAFF];

/// Validate that a role name is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}
