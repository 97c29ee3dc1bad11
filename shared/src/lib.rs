//! Shared types for the comanda ordering core
//!
//! Common types used across crates: error codes, domain models,
//! domain events, money helpers, and utility functions.

pub mod error;
pub mod event;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use event::DomainEvent;
pub use serde::{Deserialize, Serialize};
