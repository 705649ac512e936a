//! Scriptum HTTP server.
//!
//! The binary in `main.rs` is a thin wrapper; everything it wires together
//! is public here so `tests/` can build the identical router.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
