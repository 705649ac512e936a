//! Domain logic for the Scriptum academic-services platform.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` and
//! `api` crates call into it for validation and money math.

pub mod error;
pub mod finance;
pub mod installments;
pub mod order;
pub mod pagination;
pub mod roles;
pub mod slug;
pub mod types;
pub mod upload;
pub mod validation;
