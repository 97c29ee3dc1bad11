//! comanda-server — order sequencing, payment, and table-state core
//!
//! Standalone service component of a multi-tenant restaurant ordering
//! system. It owns the pieces that need real transactional care:
//!
//! - gap-free per-tenant-per-day order/receipt numbering ([`sequences`])
//! - atomic single-order and table-wide payment commits ([`payments`])
//! - derivation of table occupancy from open orders ([`tables`])
//!
//! Everything else (auth, menus, dashboards, reports) lives upstream;
//! the API layer trusts the identity those collaborators supply.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod orders;
pub mod payments;
pub mod sequences;
pub mod state;
pub mod tables;

#[cfg(test)]
pub mod test_support;

pub use error::{CoreError, CoreResult};
pub use state::AppState;
