//! Dining table model
//!
//! `status` is derived from the set of open orders, not independently
//! authoritative. RESERVED and INACTIVE are manual holds the
//! reconciler never overrides.

use serde::{Deserialize, Serialize};

/// Occupancy status of a dining table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Inactive,
}

impl TableStatus {
    /// Manual holds are set by staff and win over derivation
    pub fn is_manual_hold(&self) -> bool {
        matches!(self, Self::Reserved | Self::Inactive)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Occupied => "OCCUPIED",
            Self::Reserved => "RESERVED",
            Self::Inactive => "INACTIVE",
        }
    }
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub tenant_id: String,
    pub name: String,
    pub status: TableStatus,
    pub updated_at: i64,
}
