//! Payment model
//!
//! One committed payment against exactly one order. Immutable after
//! creation; refunds/voids happen outside this core.

use super::actor::Actor;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Accepted payment methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Card => "CARD",
            Self::Mobile => "MOBILE",
        }
    }
}

/// Committed payment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub tenant_id: String,
    pub order_id: i64,
    pub amount: Decimal,
    pub method: PaymentMethod,
    /// Cash tendered; `None` for non-cash or exact payments
    pub cash_received: Option<Decimal>,
    pub change_given: Decimal,
    /// Unique per payment, even within a table-wide batch
    pub receipt_number: String,
    /// Shared reference linking payments of one table-wide settlement
    pub table_payment_ref: Option<String>,
    /// Payment was accepted before the order reached READY/SERVED
    pub early_payment: bool,
    pub processed_by: Actor,
    pub created_at: i64,
}
