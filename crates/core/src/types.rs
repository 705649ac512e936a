/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts in minor currency units (cents).
pub type Money = i64;

/// Rates expressed in basis points (1/100 of a percent).
pub type BasisPoints = i32;
