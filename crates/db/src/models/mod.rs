//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod blog_post;
pub mod employee;
pub mod expense;
pub mod finance;
pub mod order;
pub mod payment;
pub mod payment_method;
pub mod service;
pub mod settings;
pub mod student;
pub mod transfer;
pub mod user;
