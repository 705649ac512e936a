pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod employees;
pub mod expenses;
pub mod finance;
pub mod order_payments;
pub mod orders;
pub mod payment_methods;
pub mod public;
pub mod services;
pub mod settings;
pub mod students;
pub mod transfers;
pub mod upload;
pub mod users;
