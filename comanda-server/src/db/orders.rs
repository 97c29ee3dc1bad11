//! Order and order-item rows

use shared::models::{Order, OrderItem, OrderStatus, PaymentStatus};
use shared::money;
use sqlx::SqliteConnection;

use super::decode_money;

const ORDER_COLUMNS: &str = "id, tenant_id, table_id, customer_session_id, order_number, \
     daily_sequence_value, status, payment_status, subtotal, tax_amount, service_charge, \
     total, tax_rate, tax_label, service_charge_rate, service_charge_label, created_at, \
     updated_at";

/// Raw order row; monetary columns stay TEXT until decoded
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    tenant_id: String,
    table_id: i64,
    customer_session_id: Option<String>,
    order_number: String,
    daily_sequence_value: i64,
    status: OrderStatus,
    payment_status: PaymentStatus,
    subtotal: String,
    tax_amount: String,
    service_charge: String,
    total: String,
    tax_rate: String,
    tax_label: String,
    service_charge_rate: String,
    service_charge_label: String,
    created_at: i64,
    updated_at: i64,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, sqlx::Error> {
        Ok(Order {
            id: self.id,
            tenant_id: self.tenant_id,
            table_id: self.table_id,
            customer_session_id: self.customer_session_id,
            order_number: self.order_number,
            daily_sequence_value: self.daily_sequence_value,
            status: self.status,
            payment_status: self.payment_status,
            subtotal: decode_money("subtotal", &self.subtotal)?,
            tax_amount: decode_money("tax_amount", &self.tax_amount)?,
            service_charge: decode_money("service_charge", &self.service_charge)?,
            total: decode_money("total", &self.total)?,
            tax_rate: decode_money("tax_rate", &self.tax_rate)?,
            tax_label: self.tax_label,
            service_charge_rate: decode_money("service_charge_rate", &self.service_charge_rate)?,
            service_charge_label: self.service_charge_label,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    position: i32,
    item_name: String,
    unit_price: String,
    quantity: i32,
    line_total: String,
    status: OrderStatus,
}

impl OrderItemRow {
    fn into_item(self) -> Result<OrderItem, sqlx::Error> {
        Ok(OrderItem {
            id: self.id,
            order_id: self.order_id,
            position: self.position,
            item_name: self.item_name,
            unit_price: decode_money("unit_price", &self.unit_price)?,
            quantity: self.quantity,
            line_total: decode_money("line_total", &self.line_total)?,
            status: self.status,
        })
    }
}

pub async fn insert_order(conn: &mut SqliteConnection, order: &Order) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO orders (id, tenant_id, table_id, customer_session_id, order_number, \
         daily_sequence_value, status, payment_status, subtotal, tax_amount, service_charge, \
         total, tax_rate, tax_label, service_charge_rate, service_charge_label, created_at, \
         updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id)
    .bind(&order.tenant_id)
    .bind(order.table_id)
    .bind(&order.customer_session_id)
    .bind(&order.order_number)
    .bind(order.daily_sequence_value)
    .bind(order.status)
    .bind(order.payment_status)
    .bind(money::to_db(order.subtotal))
    .bind(money::to_db(order.tax_amount))
    .bind(money::to_db(order.service_charge))
    .bind(money::to_db(order.total))
    .bind(order.tax_rate.to_string())
    .bind(&order.tax_label)
    .bind(order.service_charge_rate.to_string())
    .bind(&order.service_charge_label)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn insert_item(conn: &mut SqliteConnection, item: &OrderItem) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO order_items (id, order_id, position, item_name, unit_price, quantity, \
         line_total, status)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(item.id)
    .bind(item.order_id)
    .bind(item.position)
    .bind(&item.item_name)
    .bind(money::to_db(item.unit_price))
    .bind(item.quantity)
    .bind(money::to_db(item.line_total))
    .bind(item.status)
    .execute(conn)
    .await?;
    Ok(())
}

/// Find an order within a tenant; cross-tenant ids come back as None
pub async fn find(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    order_id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    let row: Option<OrderRow> =
        sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ? AND tenant_id = ?"))
            .bind(order_id)
            .bind(tenant_id)
            .fetch_optional(conn)
            .await?;
    row.map(OrderRow::into_order).transpose()
}

pub async fn list_items(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> Result<Vec<OrderItem>, sqlx::Error> {
    let rows: Vec<OrderItemRow> = sqlx::query_as(
        "SELECT id, order_id, position, item_name, unit_price, quantity, line_total, status
         FROM order_items WHERE order_id = ? ORDER BY position",
    )
    .bind(order_id)
    .fetch_all(conn)
    .await?;
    rows.into_iter().map(OrderItemRow::into_item).collect()
}

/// Count orders still holding the table (status not SERVED/CANCELLED)
pub async fn count_open_for_table(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    table_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders
         WHERE tenant_id = ? AND table_id = ? AND status NOT IN ('SERVED', 'CANCELLED')",
    )
    .bind(tenant_id)
    .bind(table_id)
    .fetch_one(conn)
    .await
}

/// Orders on a table that a table-wide payment settles: unpaid and in
/// an open-for-payment status (READY or SERVED)
pub async fn eligible_for_table_payment(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    table_id: i64,
) -> Result<Vec<Order>, sqlx::Error> {
    let rows: Vec<OrderRow> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders
         WHERE tenant_id = ? AND table_id = ?
           AND payment_status = 'PENDING'
           AND status IN ('READY', 'SERVED')
         ORDER BY daily_sequence_value",
    ))
    .bind(tenant_id)
    .bind(table_id)
    .fetch_all(conn)
    .await?;
    rows.into_iter().map(OrderRow::into_order).collect()
}

/// Flip `payment_status` to PAID, guarded so a concurrent payment
/// cannot settle the same order twice. Returns false when the order was
/// no longer PENDING.
pub async fn mark_paid(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    order_id: i64,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE orders SET payment_status = 'PAID', updated_at = ?
         WHERE id = ? AND tenant_id = ? AND payment_status = 'PENDING'",
    )
    .bind(now)
    .bind(order_id)
    .bind(tenant_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Persist a workflow status change; legality is checked by the caller
pub async fn update_status(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    order_id: i64,
    status: OrderStatus,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND tenant_id = ?")
        .bind(status)
        .bind(now)
        .bind(order_id)
        .bind(tenant_id)
        .execute(conn)
        .await?;
    Ok(())
}
