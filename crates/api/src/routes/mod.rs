pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod employees;
pub mod expenses;
pub mod finance;
pub mod health;
pub mod orders;
pub mod payment_methods;
pub mod public;
pub mod services;
pub mod settings;
pub mod students;
pub mod transfers;
pub mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                         login (public)
/// /auth/logout                        logout (public, clears the cookie)
/// /auth/me                            current user (requires auth)
///
/// /services, /services/{slug}         active catalogue (public)
/// /blog, /blog/{slug}                 published posts (public)
/// /settings                           public settings (public)
/// /orders                             order intake (public, POST)
///
/// /upload                             file upload (requires auth, POST)
///
/// /admin/users                        login accounts
/// /admin/students                     students
/// /admin/employees                    employees, referrers, balances
/// /admin/services                     service catalogue
/// /admin/payment-methods              payment methods
/// /admin/orders                       orders, lifecycle, payments, events
/// /admin/expenses                     expenses
/// /admin/transfers                    payouts to employees
/// /admin/blog                         blog posts
/// /admin/settings                     settings row
/// /admin/finance                      summary, employee balances
/// /admin/overview                     headline numbers
///
/// /dashboard/*                        the signed-in employee's own data
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        // Public marketing-site endpoints.
        .merge(public::router())
        .route("/upload", post(handlers::upload::upload_file))
        // Back office (admin role).
        .nest("/admin/users", users::router())
        .nest("/admin/students", students::router())
        .nest("/admin/employees", employees::router())
        .nest("/admin/services", services::router())
        .nest("/admin/payment-methods", payment_methods::router())
        .nest("/admin/orders", orders::router())
        .nest("/admin/expenses", expenses::router())
        .nest("/admin/transfers", transfers::router())
        .nest("/admin/blog", blog::router())
        .nest("/admin/settings", settings::router())
        .nest("/admin/finance", finance::router())
        .route("/admin/overview", get(handlers::finance::overview))
        // Employee dashboard.
        .nest("/dashboard", dashboard::router())
}
