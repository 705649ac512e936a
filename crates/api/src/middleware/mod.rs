//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the user behind the `session` cookie.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireAuth`] -- requires any authenticated user.
//! - [`rbac::RequireEmployee`] -- requires a user linked to an active employee.

pub mod auth;
pub mod rbac;
