//! Audit log operations
//!
//! Append-only compliance trail: actor, action, before/after detail.
//! Written inside the same transaction as the change it describes and
//! read later by reporting collaborators.

use serde::Serialize;
use shared::models::Actor;
use sqlx::SqliteConnection;

/// Write an audit log entry
pub async fn log(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    actor: Actor,
    action: &str,
    detail: Option<&serde_json::Value>,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_logs (tenant_id, actor_id, actor_type, action, detail, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(tenant_id)
    .bind(actor.id())
    .bind(actor.kind())
    .bind(action)
    .bind(detail.map(|d| d.to_string()))
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// Audit log entry as returned to reporting consumers
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub actor_id: i64,
    pub actor_type: String,
    pub action: String,
    pub detail: Option<serde_json::Value>,
    pub created_at: i64,
}

#[derive(sqlx::FromRow)]
struct AuditRow {
    id: i64,
    actor_id: i64,
    actor_type: String,
    action: String,
    detail: Option<String>,
    created_at: i64,
}

/// Query audit log entries for a tenant (paginated, newest first)
pub async fn query(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<AuditEntry>, sqlx::Error> {
    let rows: Vec<AuditRow> = sqlx::query_as(
        "SELECT id, actor_id, actor_type, action, detail, created_at FROM audit_logs
         WHERE tenant_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(tenant_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| AuditEntry {
            id: row.id,
            actor_id: row.actor_id,
            actor_type: row.actor_type,
            action: row.action,
            detail: row
                .detail
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            created_at: row.created_at,
        })
        .collect())
}
