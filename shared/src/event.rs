//! Domain events published after state changes commit
//!
//! Best-effort fan-out for kitchen displays and dashboards. Consumers
//! must tolerate missed and duplicate deliveries; nothing in the core
//! depends on these being received.

use crate::models::{Actor, OrderStatus, PaymentMethod, TableStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Event envelope broadcast after a successful commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    OrderCreated {
        tenant_id: String,
        order_id: i64,
        table_id: i64,
        order_number: String,
        total: Decimal,
        timestamp: i64,
    },
    OrderStatusChanged {
        tenant_id: String,
        order_id: i64,
        previous: OrderStatus,
        new: OrderStatus,
        actor: Actor,
        timestamp: i64,
    },
    PaymentCompleted {
        tenant_id: String,
        order_id: i64,
        receipt_number: String,
        amount: Decimal,
        method: PaymentMethod,
        timestamp: i64,
    },
    TableStatusChanged {
        tenant_id: String,
        table_id: i64,
        previous: TableStatus,
        new: TableStatus,
        actor: Actor,
        timestamp: i64,
    },
}

impl DomainEvent {
    /// Tenant the event belongs to (all events are tenant-scoped)
    pub fn tenant_id(&self) -> &str {
        match self {
            Self::OrderCreated { tenant_id, .. }
            | Self::OrderStatusChanged { tenant_id, .. }
            | Self::PaymentCompleted { tenant_id, .. }
            | Self::TableStatusChanged { tenant_id, .. } => tenant_id,
        }
    }
}
