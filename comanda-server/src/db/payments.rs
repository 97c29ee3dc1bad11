//! Payment rows
//!
//! Immutable after insert. `receipt_number` carries a UNIQUE index as a
//! hard backstop against duplicate allocation.

use shared::models::{Actor, Payment, PaymentMethod};
use shared::money;
use sqlx::SqliteConnection;

use super::decode_money;

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    tenant_id: String,
    order_id: i64,
    amount: String,
    method: PaymentMethod,
    cash_received: Option<String>,
    change_given: String,
    receipt_number: String,
    table_payment_ref: Option<String>,
    early_payment: bool,
    processed_by: i64,
    processed_by_type: String,
    created_at: i64,
}

impl PaymentRow {
    fn into_payment(self) -> Result<Payment, sqlx::Error> {
        let processed_by =
            Actor::from_parts(&self.processed_by_type, self.processed_by).ok_or_else(|| {
                sqlx::Error::ColumnDecode {
                    index: "processed_by_type".into(),
                    source: format!("unknown actor type: {}", self.processed_by_type).into(),
                }
            })?;
        Ok(Payment {
            id: self.id,
            tenant_id: self.tenant_id,
            order_id: self.order_id,
            amount: decode_money("amount", &self.amount)?,
            method: self.method,
            cash_received: self
                .cash_received
                .as_deref()
                .map(|raw| decode_money("cash_received", raw))
                .transpose()?,
            change_given: decode_money("change_given", &self.change_given)?,
            receipt_number: self.receipt_number,
            table_payment_ref: self.table_payment_ref,
            early_payment: self.early_payment,
            processed_by,
            created_at: self.created_at,
        })
    }
}

pub async fn insert(conn: &mut SqliteConnection, payment: &Payment) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO payments (id, tenant_id, order_id, amount, method, cash_received, \
         change_given, receipt_number, table_payment_ref, early_payment, processed_by, \
         processed_by_type, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(payment.id)
    .bind(&payment.tenant_id)
    .bind(payment.order_id)
    .bind(money::to_db(payment.amount))
    .bind(payment.method)
    .bind(payment.cash_received.map(money::to_db))
    .bind(money::to_db(payment.change_given))
    .bind(&payment.receipt_number)
    .bind(&payment.table_payment_ref)
    .bind(payment.early_payment)
    .bind(payment.processed_by.id())
    .bind(payment.processed_by.kind())
    .bind(payment.created_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Payments recorded against an order (at most one in this core)
pub async fn list_by_order(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> Result<Vec<Payment>, sqlx::Error> {
    let rows: Vec<PaymentRow> = sqlx::query_as(
        "SELECT id, tenant_id, order_id, amount, method, cash_received, change_given, \
         receipt_number, table_payment_ref, early_payment, processed_by, processed_by_type, \
         created_at
         FROM payments WHERE order_id = ? ORDER BY created_at",
    )
    .bind(order_id)
    .fetch_all(conn)
    .await?;
    rows.into_iter().map(PaymentRow::into_payment).collect()
}
