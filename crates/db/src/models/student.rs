//! Student entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptum_core::types::{DbId, Timestamp};
use scriptum_core::validation::not_blank;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub university: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Student plus the number of orders placed.
#[derive(Debug, Clone, Serialize)]
pub struct StudentWithStats {
    #[serde(flatten)]
    pub student: Student,
    pub order_count: i64,
}

/// DTO for creating a new student.
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateStudent {
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
    pub notes: Option<String>,
}

/// DTO for updating an existing student. All fields are optional.
#[derive(Debug, Default, Deserialize, validator::Validate)]
pub struct UpdateStudent {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(length(max = 200))]
    pub university: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}
