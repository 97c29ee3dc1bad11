//! Data models
//!
//! Shared between the server and API consumers.
//! Status enums use `#[cfg_attr(feature = "db", derive(sqlx::Type))]`
//! and are stored as SCREAMING_SNAKE_CASE TEXT.
//! All IDs are `i64` (snowflake-style, see [`crate::util::snowflake_id`]).

pub mod actor;
pub mod dining_table;
pub mod order;
pub mod payment;

// Re-exports
pub use actor::*;
pub use dining_table::*;
pub use order::*;
pub use payment::*;
