//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod blog_post_repo;
pub mod employee_repo;
pub mod expense_repo;
pub mod finance_repo;
pub mod order_repo;
pub mod payment_method_repo;
pub mod payment_repo;
pub mod service_repo;
pub mod settings_repo;
pub mod student_repo;
pub mod transfer_repo;
pub mod user_repo;

pub use blog_post_repo::BlogPostRepo;
pub use employee_repo::EmployeeRepo;
pub use expense_repo::ExpenseRepo;
pub use finance_repo::FinanceRepo;
pub use order_repo::OrderRepo;
pub use payment_method_repo::PaymentMethodRepo;
pub use payment_repo::PaymentRepo;
pub use service_repo::ServiceRepo;
pub use settings_repo::SettingsRepo;
pub use student_repo::StudentRepo;
pub use transfer_repo::TransferRepo;
pub use user_repo::UserRepo;
