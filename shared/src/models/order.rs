//! Order aggregate: workflow status, payment status, order and item rows
//!
//! `status` and `payment_status` are deliberately two independent state
//! machines. Paying an order never advances its preparation status, and
//! advancing preparation never implies payment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kitchen/staff workflow status of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further workflow transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Served | Self::Cancelled)
    }

    /// An open order still holds its table
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }

    /// Orders in these states are eligible for table-wide settlement
    pub fn is_open_for_payment(&self) -> bool {
        matches!(self, Self::Ready | Self::Served)
    }

    /// Transition table for the workflow state machine
    ///
    /// Forward one step at a time; CANCELLED is reachable from any
    /// non-terminal state.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Preparing)
                | (Self::Preparing, Self::Ready)
                | (Self::Ready, Self::Served)
        ) || (next == Self::Cancelled && !self.is_terminal())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Served => "SERVED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Settlement status of an order, independent of [`OrderStatus`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Paid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
        }
    }
}

/// Order entity
///
/// Monetary fields are snapshots taken at creation time; later rate
/// changes never retroactively alter historical orders. Orders are
/// never physically deleted; cancellation is a status value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub tenant_id: String,
    pub table_id: i64,
    pub customer_session_id: Option<String>,
    /// Formatted order number, e.g. `ORD-250830-R1XX-001`
    pub order_number: String,
    /// Raw per-tenant-per-day sequence value behind `order_number`
    pub daily_sequence_value: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub service_charge: Decimal,
    pub total: Decimal,
    /// Snapshotted tax rate in percent (e.g. 10 for 10% IVA)
    pub tax_rate: Decimal,
    pub tax_label: String,
    /// Snapshotted service charge rate in percent
    pub service_charge_rate: Decimal,
    pub service_charge_label: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item: immutable price/quantity snapshot at order time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// Zero-based position of the line within the cart snapshot
    pub position: i32,
    pub item_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
    /// Kitchen sub-status mirror (PENDING/PREPARING/READY/SERVED)
    pub status: OrderStatus,
}

/// Line-item input from the external cart collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub item_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}
