//! Money helpers using rust_decimal for precision
//!
//! All monetary arithmetic in the core runs on `Decimal`; floats never
//! touch money. SQLite stores monetary columns as canonical decimal
//! strings produced and parsed here.

use rust_decimal::{Decimal, RoundingStrategy};

/// Monetary values round to 2 decimal places, half-up
pub const DECIMAL_PLACES: u32 = 2;

/// Round a monetary amount to [`DECIMAL_PLACES`]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Canonical database representation of a monetary amount
pub fn to_db(value: Decimal) -> String {
    round_money(value).to_string()
}

/// Parse a monetary column written by [`to_db`]
pub fn parse_db(raw: &str) -> Result<Decimal, rust_decimal::Error> {
    raw.parse::<Decimal>()
}
