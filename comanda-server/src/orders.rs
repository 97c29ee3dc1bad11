//! Order creation and workflow transitions
//!
//! An order is created from the finalized cart snapshot the external
//! cart service supplies: name, unit price, quantity per line. Monetary
//! totals and the tax/service-charge rates are snapshotted at creation
//! and never recomputed, so later rate changes cannot alter history.

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::event::DomainEvent;
use shared::models::{CartItem, Identity, Order, OrderItem, OrderStatus, PaymentStatus};
use shared::money::round_money;
use shared::util::{now_millis, snowflake_id};

use crate::db;
use crate::error::{CoreError, CoreResult};
use crate::sequences;
use crate::state::AppState;
use crate::tables;

/// Order creation request (cart snapshot from the session service)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub table_id: i64,
    pub customer_session_id: Option<String>,
    pub items: Vec<CartItem>,
}

/// Create an order: mint the day's next order number, persist the
/// aggregate atomically, then (best-effort) flip the table to OCCUPIED
/// and announce the order.
pub async fn create_order(
    state: &AppState,
    identity: &Identity,
    req: CreateOrder,
) -> CoreResult<Order> {
    validate_cart(&req.items)?;

    let mut tx = state.pool.begin().await?;

    db::tables::find(&mut *tx, &identity.tenant_id, req.table_id)
        .await?
        .ok_or(CoreError::NotFound("table"))?;

    let seq = sequences::next_order_number(&mut *tx, state.tz, &identity.tenant_id).await?;

    let subtotal: Decimal = req
        .items
        .iter()
        .map(|item| round_money(item.unit_price * Decimal::from(item.quantity)))
        .sum();
    let tax_amount = round_money(subtotal * state.rates.tax_rate / Decimal::ONE_HUNDRED);
    let service_charge =
        round_money(subtotal * state.rates.service_charge_rate / Decimal::ONE_HUNDRED);
    let total = subtotal + tax_amount + service_charge;

    let now = now_millis();
    let order = Order {
        id: snowflake_id(),
        tenant_id: identity.tenant_id.clone(),
        table_id: req.table_id,
        customer_session_id: req.customer_session_id,
        order_number: seq.formatted,
        daily_sequence_value: seq.value,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        subtotal,
        tax_amount,
        service_charge,
        total,
        tax_rate: state.rates.tax_rate,
        tax_label: state.rates.tax_label.clone(),
        service_charge_rate: state.rates.service_charge_rate,
        service_charge_label: state.rates.service_charge_label.clone(),
        created_at: now,
        updated_at: now,
    };
    db::orders::insert_order(&mut *tx, &order).await?;

    for (position, item) in req.items.iter().enumerate() {
        let line = OrderItem {
            id: snowflake_id(),
            order_id: order.id,
            position: position as i32,
            item_name: item.item_name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: round_money(item.unit_price * Decimal::from(item.quantity)),
            status: OrderStatus::Pending,
        };
        db::orders::insert_item(&mut *tx, &line).await?;
    }

    let detail = serde_json::json!({
        "order_number": order.order_number,
        "table_id": order.table_id,
        "total": order.total.to_string(),
        "item_count": req.items.len(),
    });
    db::audit::log(
        &mut *tx,
        &identity.tenant_id,
        identity.actor,
        "order.create",
        Some(&detail),
        now,
    )
    .await?;

    tx.commit().await?;
    tracing::info!(
        order_id = order.id,
        order_number = %order.order_number,
        "Order created"
    );

    // Post-commit side effects: never unwind the committed order.
    state.events.publish(DomainEvent::OrderCreated {
        tenant_id: order.tenant_id.clone(),
        order_id: order.id,
        table_id: order.table_id,
        order_number: order.order_number.clone(),
        total: order.total,
        timestamp: now,
    });
    if let Err(e) = tables::reconcile(state, identity, order.table_id).await {
        tracing::warn!(table_id = order.table_id, error = %e, "Post-create table reconciliation failed");
    }

    Ok(order)
}

/// Advance the kitchen/staff workflow status of an order.
///
/// Only the transitions in [`OrderStatus::can_transition_to`] are
/// legal. This never touches `payment_status`; the two state machines
/// stay independent in both directions.
pub async fn advance_status(
    state: &AppState,
    identity: &Identity,
    order_id: i64,
    new_status: OrderStatus,
) -> CoreResult<Order> {
    let mut tx = state.pool.begin().await?;

    let order = db::orders::find(&mut *tx, &identity.tenant_id, order_id)
        .await?
        .ok_or(CoreError::NotFound("order"))?;

    if !order.status.can_transition_to(new_status) {
        return Err(CoreError::InvalidTransition {
            from: order.status,
            to: new_status,
        });
    }

    let now = now_millis();
    db::orders::update_status(&mut *tx, &identity.tenant_id, order_id, new_status, now).await?;

    let detail = serde_json::json!({
        "order_number": order.order_number,
        "before": order.status.as_str(),
        "after": new_status.as_str(),
    });
    db::audit::log(
        &mut *tx,
        &identity.tenant_id,
        identity.actor,
        "order.status",
        Some(&detail),
        now,
    )
    .await?;

    tx.commit().await?;

    state.events.publish(DomainEvent::OrderStatusChanged {
        tenant_id: identity.tenant_id.clone(),
        order_id,
        previous: order.status,
        new: new_status,
        actor: identity.actor,
        timestamp: now,
    });

    // Terminal transitions can free the table.
    if new_status.is_terminal()
        && let Err(e) = tables::reconcile(state, identity, order.table_id).await
    {
        tracing::warn!(table_id = order.table_id, error = %e, "Post-transition table reconciliation failed");
    }

    Ok(Order {
        status: new_status,
        updated_at: now,
        ..order
    })
}

/// Load an order with its line items
pub async fn get_order(
    state: &AppState,
    identity: &Identity,
    order_id: i64,
) -> CoreResult<(Order, Vec<OrderItem>)> {
    let mut conn = state.pool.acquire().await?;
    let order = db::orders::find(&mut conn, &identity.tenant_id, order_id)
        .await?
        .ok_or(CoreError::NotFound("order"))?;
    let items = db::orders::list_items(&mut conn, order_id).await?;
    Ok((order, items))
}

fn validate_cart(items: &[CartItem]) -> CoreResult<()> {
    if items.is_empty() {
        return Err(CoreError::EmptyOrder);
    }
    for item in items {
        if item.item_name.trim().is_empty() {
            return Err(CoreError::Validation("item name must not be empty".into()));
        }
        if item.quantity <= 0 {
            return Err(CoreError::Validation(format!(
                "quantity must be positive, got {}",
                item.quantity
            )));
        }
        if item.unit_price.is_sign_negative() {
            return Err(CoreError::Validation(format!(
                "unit price must be non-negative, got {}",
                item.unit_price
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cart_item, seed_table, staff_identity, test_state};
    use shared::models::TableStatus;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn create_order_snapshots_decimal_totals() {
        let ctx = test_state().await;
        let identity = staff_identity("R1");
        let table_id = seed_table(&ctx.state, "R1", TableStatus::Available).await;

        let order = create_order(
            &ctx.state,
            &identity,
            CreateOrder {
                table_id,
                customer_session_id: Some("sess-1".into()),
                items: vec![cart_item("Paella", "10.50", 2), cart_item("Agua", "1.20", 1)],
            },
        )
        .await
        .unwrap();

        // Test fixture rates: 10% tax, no service charge.
        assert_eq!(order.subtotal, dec("22.20"));
        assert_eq!(order.tax_amount, dec("2.22"));
        assert_eq!(order.service_charge, dec("0.00"));
        assert_eq!(order.total, dec("24.42"));
        assert_eq!(order.daily_sequence_value, 1);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);

        let (stored, items) = get_order(&ctx.state, &identity, order.id).await.unwrap();
        assert_eq!(stored.total, dec("24.42"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].line_total, dec("21.00"));
    }

    #[tokio::test]
    async fn items_come_back_in_cart_order() {
        let ctx = test_state().await;
        let identity = staff_identity("R1");
        let table_id = seed_table(&ctx.state, "R1", TableStatus::Available).await;

        let names = ["Paella", "Agua", "Pan", "Café", "Flan"];
        let order = create_order(
            &ctx.state,
            &identity,
            CreateOrder {
                table_id,
                customer_session_id: None,
                items: names
                    .iter()
                    .map(|name| cart_item(name, "2.00", 1))
                    .collect(),
            },
        )
        .await
        .unwrap();

        let (_, items) = get_order(&ctx.state, &identity, order.id).await.unwrap();
        let stored: Vec<&str> = items.iter().map(|i| i.item_name.as_str()).collect();
        assert_eq!(stored, names);
        for (idx, item) in items.iter().enumerate() {
            assert_eq!(item.position, idx as i32);
        }
    }

    #[tokio::test]
    async fn create_order_occupies_the_table() {
        let ctx = test_state().await;
        let identity = staff_identity("R1");
        let table_id = seed_table(&ctx.state, "R1", TableStatus::Available).await;

        create_order(
            &ctx.state,
            &identity,
            CreateOrder {
                table_id,
                customer_session_id: None,
                items: vec![cart_item("Café", "1.50", 1)],
            },
        )
        .await
        .unwrap();

        let mut conn = ctx.state.pool.acquire().await.unwrap();
        let table = db::tables::find(&mut conn, "R1", table_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let ctx = test_state().await;
        let identity = staff_identity("R1");
        let table_id = seed_table(&ctx.state, "R1", TableStatus::Available).await;

        let err = create_order(
            &ctx.state,
            &identity,
            CreateOrder {
                table_id,
                customer_session_id: None,
                items: vec![],
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CoreError::EmptyOrder));
    }

    #[tokio::test]
    async fn unknown_table_is_not_found() {
        let ctx = test_state().await;
        let identity = staff_identity("R1");

        let err = create_order(
            &ctx.state,
            &identity,
            CreateOrder {
                table_id: 999,
                customer_session_id: None,
                items: vec![cart_item("Café", "1.50", 1)],
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CoreError::NotFound("table")));
    }

    #[tokio::test]
    async fn workflow_advances_one_step_at_a_time() {
        let ctx = test_state().await;
        let identity = staff_identity("R1");
        let table_id = seed_table(&ctx.state, "R1", TableStatus::Available).await;
        let order = create_order(
            &ctx.state,
            &identity,
            CreateOrder {
                table_id,
                customer_session_id: None,
                items: vec![cart_item("Menú", "12.00", 1)],
            },
        )
        .await
        .unwrap();

        let confirmed = advance_status(&ctx.state, &identity, order.id, OrderStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.status, OrderStatus::Confirmed);

        // Skipping PREPARING is illegal.
        let err = advance_status(&ctx.state, &identity, order.id, OrderStatus::Served)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn serving_the_last_order_frees_the_table() {
        let ctx = test_state().await;
        let identity = staff_identity("R1");
        let table_id = seed_table(&ctx.state, "R1", TableStatus::Available).await;
        let order = create_order(
            &ctx.state,
            &identity,
            CreateOrder {
                table_id,
                customer_session_id: None,
                items: vec![cart_item("Menú", "12.00", 1)],
            },
        )
        .await
        .unwrap();

        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Served,
        ] {
            advance_status(&ctx.state, &identity, order.id, status)
                .await
                .unwrap();
        }

        let mut conn = ctx.state.pool.acquire().await.unwrap();
        let table = db::tables::find(&mut conn, "R1", table_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(table.status, TableStatus::Available);
    }

    #[tokio::test]
    async fn cancellation_is_a_status_not_a_deletion() {
        let ctx = test_state().await;
        let identity = staff_identity("R1");
        let table_id = seed_table(&ctx.state, "R1", TableStatus::Available).await;
        let order = create_order(
            &ctx.state,
            &identity,
            CreateOrder {
                table_id,
                customer_session_id: None,
                items: vec![cart_item("Menú", "12.00", 1)],
            },
        )
        .await
        .unwrap();

        advance_status(&ctx.state, &identity, order.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        let (stored, _) = get_order(&ctx.state, &identity, order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Cancelled);
        // Payment status is untouched by cancellation.
        assert_eq!(stored.payment_status, PaymentStatus::Pending);
    }
}
