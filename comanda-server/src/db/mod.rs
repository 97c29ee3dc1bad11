//! Store layer
//!
//! Thin sqlx query modules, one per table family. Functions take a
//! `&mut SqliteConnection` so they compose inside transactions; the
//! serialized SQLite writer gives the row-locking semantics the core
//! relies on. Monetary columns travel as canonical decimal strings and
//! decode into `Decimal` at this boundary.

pub mod audit;
pub mod orders;
pub mod payments;
pub mod sequences;
pub mod tables;

use rust_decimal::Decimal;

/// Decode a monetary TEXT column written by `shared::money::to_db`
pub(crate) fn decode_money(column: &str, raw: &str) -> Result<Decimal, sqlx::Error> {
    shared::money::parse_db(raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
