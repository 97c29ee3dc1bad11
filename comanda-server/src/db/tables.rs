//! Dining table rows

use shared::models::{DiningTable, TableStatus};
use sqlx::SqliteConnection;

pub async fn insert(conn: &mut SqliteConnection, table: &DiningTable) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO dining_tables (id, tenant_id, name, status, updated_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(table.id)
    .bind(&table.tenant_id)
    .bind(&table.name)
    .bind(table.status)
    .bind(table.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    table_id: i64,
) -> Result<Option<DiningTable>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, tenant_id, name, status, updated_at FROM dining_tables
         WHERE id = ? AND tenant_id = ?",
    )
    .bind(table_id)
    .bind(tenant_id)
    .fetch_optional(conn)
    .await
}

pub async fn update_status(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    table_id: i64,
    status: TableStatus,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE dining_tables SET status = ?, updated_at = ? WHERE id = ? AND tenant_id = ?")
        .bind(status)
        .bind(now)
        .bind(table_id)
        .bind(tenant_id)
        .execute(conn)
        .await?;
    Ok(())
}
