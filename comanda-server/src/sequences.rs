//! Daily sequence allocator
//!
//! Issues gap-free, collision-free per-tenant-per-day order and receipt
//! numbers. State lives in the `daily_sequence` table and is mutated
//! only through an atomic upsert-increment (see [`crate::db::sequences`]);
//! an in-process counter would break the moment a second server
//! instance starts.
//!
//! Formatted numbers look like `ORD-250830-R1XX-001`: fixed prefix,
//! business date as YYMMDD, 4-char tenant code, counter zero-padded to
//! 3 digits. Values past 999 simply widen; padding alignment is the
//! only thing that changes.

use chrono::NaiveDate;
use chrono_tz::Tz;
use sqlx::SqliteConnection;

use crate::db;

/// A freshly allocated sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceNumber {
    /// Raw counter value, contiguous from 1 per (tenant, date, kind)
    pub value: i64,
    /// Deterministic formatted string
    pub formatted: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceKind {
    Order,
    Receipt,
}

impl SequenceKind {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Order => "ORD",
            Self::Receipt => "RCP",
        }
    }
}

/// Today in the business timezone; the day rolls over at local midnight
pub fn business_date(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

fn format_number(kind: SequenceKind, date: NaiveDate, tenant_id: &str, value: i64) -> String {
    format!(
        "{}-{}-{}-{:03}",
        kind.prefix(),
        date.format("%y%m%d"),
        shared::util::tenant_code(tenant_id),
        value
    )
}

/// Allocate the next order number for a tenant
pub async fn next_order_number(
    conn: &mut SqliteConnection,
    tz: Tz,
    tenant_id: &str,
) -> Result<SequenceNumber, sqlx::Error> {
    let date = business_date(tz);
    let value =
        db::sequences::next_order_count(conn, tenant_id, &date.format("%Y-%m-%d").to_string())
            .await?;
    Ok(SequenceNumber {
        value,
        formatted: format_number(SequenceKind::Order, date, tenant_id, value),
    })
}

/// Allocate the next receipt number for a tenant
pub async fn next_receipt_number(
    conn: &mut SqliteConnection,
    tz: Tz,
    tenant_id: &str,
) -> Result<SequenceNumber, sqlx::Error> {
    let date = business_date(tz);
    let value =
        db::sequences::next_payment_count(conn, tenant_id, &date.format("%Y-%m-%d").to_string())
            .await?;
    Ok(SequenceNumber {
        value,
        formatted: format_number(SequenceKind::Receipt, date, tenant_id, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use std::collections::HashSet;

    #[test]
    fn formatting_is_deterministic() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 30).unwrap();
        assert_eq!(
            format_number(SequenceKind::Order, date, "R1", 1),
            "ORD-250830-R1XX-001"
        );
        assert_eq!(
            format_number(SequenceKind::Receipt, date, "casa-lola", 42),
            "RCP-250830-CASA-042"
        );
    }

    #[test]
    fn overflow_widens_instead_of_truncating() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(
            format_number(SequenceKind::Order, date, "R1", 1000),
            "ORD-251231-R1XX-1000"
        );
    }

    #[tokio::test]
    async fn first_allocation_of_the_day_is_one() {
        let ctx = test_state().await;
        let mut conn = ctx.state.pool.acquire().await.unwrap();
        let seq = next_order_number(&mut conn, ctx.state.tz, "R1").await.unwrap();
        assert_eq!(seq.value, 1);
        let expected = format!(
            "ORD-{}-R1XX-001",
            business_date(ctx.state.tz).format("%y%m%d")
        );
        assert_eq!(seq.formatted, expected);
    }

    #[tokio::test]
    async fn order_and_receipt_counters_are_independent() {
        let ctx = test_state().await;
        let mut conn = ctx.state.pool.acquire().await.unwrap();
        let order = next_order_number(&mut conn, ctx.state.tz, "R1").await.unwrap();
        let receipt = next_receipt_number(&mut conn, ctx.state.tz, "R1").await.unwrap();
        let receipt2 = next_receipt_number(&mut conn, ctx.state.tz, "R1").await.unwrap();
        assert_eq!(order.value, 1);
        assert_eq!(receipt.value, 1);
        assert_eq!(receipt2.value, 2);
    }

    #[tokio::test]
    async fn tenants_do_not_share_counters() {
        let ctx = test_state().await;
        let mut conn = ctx.state.pool.acquire().await.unwrap();
        next_order_number(&mut conn, ctx.state.tz, "R1").await.unwrap();
        next_order_number(&mut conn, ctx.state.tz, "R1").await.unwrap();
        let other = next_order_number(&mut conn, ctx.state.tz, "R2").await.unwrap();
        assert_eq!(other.value, 1);
    }

    #[tokio::test]
    async fn concurrent_allocations_form_a_contiguous_range() {
        let ctx = test_state().await;
        const TASKS: i64 = 16;

        let mut handles = Vec::new();
        for _ in 0..TASKS {
            let state = ctx.state.clone();
            handles.push(tokio::spawn(async move {
                let mut conn = state.pool.acquire().await.unwrap();
                next_order_number(&mut conn, state.tz, "R1")
                    .await
                    .unwrap()
                    .value
            }));
        }

        let mut values = HashSet::new();
        for handle in handles {
            assert!(values.insert(handle.await.unwrap()), "duplicate sequence value");
        }
        let expected: HashSet<i64> = (1..=TASKS).collect();
        assert_eq!(values, expected);
    }
}
