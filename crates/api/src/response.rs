//! The `{ "data": ... }` envelope every successful JSON response uses.
//!
//! Errors use a different shape (`{ "error", "code" }`, see
//! [`crate::error::AppError`]), so clients can branch on the top-level key.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
