//! Core error taxonomy
//!
//! Everything raised inside a transaction rolls back before surfacing.
//! `Store` covers transient store failures (lock contention, connection
//! loss); callers may retry the whole operation from scratch, since the
//! atomic upsert and guarded updates make retries safe — a retried
//! payment re-checks AlreadyPaid first.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use thiserror::Error;

/// Errors produced by the ordering/payment/table core
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("order {0} is already paid")]
    AlreadyPaid(i64),

    #[error("insufficient cash: required {required}, received {received}")]
    InsufficientCash { required: Decimal, received: Decimal },

    /// Covers cross-tenant access attempts as well; those must be
    /// indistinguishable from a plain miss.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("illegal status transition: {from:?} -> {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("order has no items")]
    EmptyOrder,

    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AppError::with_message(ErrorCode::ValidationFailed, msg),
            CoreError::AlreadyPaid(order_id) => {
                AppError::new(ErrorCode::OrderAlreadyPaid).with_detail("order_id", order_id)
            }
            CoreError::InsufficientCash { required, received } => {
                AppError::new(ErrorCode::PaymentInsufficientAmount)
                    .with_detail("required", required.to_string())
                    .with_detail("received", received.to_string())
            }
            CoreError::NotFound(resource) => {
                let code = match resource {
                    "order" => ErrorCode::OrderNotFound,
                    "table" => ErrorCode::TableNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::with_message(code, format!("{resource} not found"))
            }
            CoreError::InvalidTransition { from, to } => {
                AppError::new(ErrorCode::OrderInvalidTransition)
                    .with_detail("from", from.as_str())
                    .with_detail("to", to.as_str())
            }
            CoreError::EmptyOrder => AppError::new(ErrorCode::OrderEmpty),
            CoreError::Store(e) => {
                tracing::error!(error = %e, "Store error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}
