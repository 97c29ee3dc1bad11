//! Daily sequence counter rows
//!
//! One row per (tenant, business date). The increment is a single
//! upsert statement with `RETURNING`, never a read-then-write pair, so
//! concurrent callers can never observe the same value and the range
//! stays contiguous from 1.

use sqlx::SqliteConnection;

/// Atomically increment and fetch the order counter for the day
pub async fn next_order_count(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    seq_date: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO daily_sequence (tenant_id, seq_date, order_count, payment_count)
         VALUES (?, ?, 1, 0)
         ON CONFLICT (tenant_id, seq_date) DO UPDATE SET order_count = order_count + 1
         RETURNING order_count",
    )
    .bind(tenant_id)
    .bind(seq_date)
    .fetch_one(conn)
    .await
}

/// Atomically increment and fetch the receipt counter for the day
pub async fn next_payment_count(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    seq_date: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO daily_sequence (tenant_id, seq_date, order_count, payment_count)
         VALUES (?, ?, 0, 1)
         ON CONFLICT (tenant_id, seq_date) DO UPDATE SET payment_count = payment_count + 1
         RETURNING payment_count",
    )
    .bind(tenant_id)
    .bind(seq_date)
    .fetch_one(conn)
    .await
}

/// Current counter pair for a (tenant, date) key, if the row exists
pub async fn get_counters(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    seq_date: &str,
) -> Result<Option<(i64, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT order_count, payment_count FROM daily_sequence
         WHERE tenant_id = ? AND seq_date = ?",
    )
    .bind(tenant_id)
    .bind(seq_date)
    .fetch_optional(conn)
    .await
}
