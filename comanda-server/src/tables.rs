//! Table status reconciler
//!
//! Table status is derived truth: it must always reflect whether any
//! open order (status not SERVED/CANCELLED) is holding the table. The
//! reconciler always recomputes the target from the current open-order
//! set instead of applying deltas, so concurrent triggers (an order
//! being created while a payment completes) self-heal on the next call
//! and a table can never stay stuck OCCUPIED once its orders close.

use shared::event::DomainEvent;
use shared::models::{Identity, TableStatus};
use shared::util::now_millis;

use crate::db;
use crate::error::{CoreError, CoreResult};
use crate::state::AppState;

/// Recompute and commit a table's occupancy status. Idempotent: when
/// the derived target matches the stored status there is no write and
/// no event.
pub async fn reconcile(
    state: &AppState,
    identity: &Identity,
    table_id: i64,
) -> CoreResult<TableStatus> {
    let mut tx = state.pool.begin().await?;

    let table = db::tables::find(&mut *tx, &identity.tenant_id, table_id)
        .await?
        .ok_or(CoreError::NotFound("table"))?;

    let open_orders =
        db::orders::count_open_for_table(&mut *tx, &identity.tenant_id, table_id).await?;

    let target = derive_status(table.status, open_orders);
    if target == table.status {
        return Ok(target);
    }

    db::tables::update_status(&mut *tx, &identity.tenant_id, table_id, target, now_millis())
        .await?;
    tx.commit().await?;

    tracing::info!(
        table_id,
        previous = table.status.as_str(),
        new = target.as_str(),
        "Table status reconciled"
    );
    state.events.publish(DomainEvent::TableStatusChanged {
        tenant_id: identity.tenant_id.clone(),
        table_id,
        previous: table.status,
        new: target,
        actor: identity.actor,
        timestamp: now_millis(),
    });

    Ok(target)
}

/// Target status from the open-order count. Manual holds (RESERVED and
/// INACTIVE) win only while the table has no open orders.
fn derive_status(current: TableStatus, open_orders: i64) -> TableStatus {
    if open_orders > 0 {
        TableStatus::Occupied
    } else if current.is_manual_hold() {
        current
    } else {
        TableStatus::Available
    }
}
