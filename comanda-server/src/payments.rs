//! Payment settlement
//!
//! Supports paying a single order or settling every eligible order on a
//! table in one batch. Settlement is all-or-nothing inside one database
//! transaction; the guarded `mark_paid` update is what makes two
//! concurrent attempts on the same order resolve to exactly one winner.

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::event::DomainEvent;
use shared::models::{Identity, Order, Payment, PaymentMethod, PaymentStatus};
use shared::money::round_money;
use shared::util::{now_millis, snowflake_id};

use crate::db;
use crate::error::{CoreError, CoreResult};
use crate::sequences;
use crate::state::AppState;
use crate::tables;

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub method: PaymentMethod,
    /// Cash tendered; required for cash, must be absent otherwise.
    pub cash_received: Option<Decimal>,
    /// Settle every eligible order on the order's table in one batch.
    #[serde(default)]
    pub pay_full_table: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PaymentOutcome {
    pub payments: Vec<Payment>,
    pub total_paid: Decimal,
    pub change_given: Option<Decimal>,
    /// Base receipt number shared by a table-wide batch.
    pub table_payment_ref: Option<String>,
}

/// Settle payment for an order, or for its whole table when
/// `pay_full_table` is set.
pub async fn process_payment(
    state: &AppState,
    identity: &Identity,
    order_id: i64,
    req: PaymentRequest,
) -> CoreResult<PaymentOutcome> {
    validate_method(&req)?;

    let mut tx = state.pool.begin().await?;

    let order = db::orders::find(&mut *tx, &identity.tenant_id, order_id)
        .await?
        .ok_or(CoreError::NotFound("order"))?;
    if order.payment_status.is_settled() {
        return Err(CoreError::AlreadyPaid(order.id));
    }

    let table_id = order.table_id;
    let targets: Vec<Order> = if req.pay_full_table {
        let eligible =
            db::orders::eligible_for_table_payment(&mut *tx, &identity.tenant_id, table_id).await?;
        if eligible.is_empty() {
            return Err(CoreError::Validation(
                "no orders eligible for table payment".into(),
            ));
        }
        eligible
    } else {
        vec![order]
    };

    let total: Decimal = targets.iter().map(|o| o.total).sum();
    let change = match (req.method, req.cash_received) {
        (PaymentMethod::Cash, Some(received)) => {
            if received < total {
                return Err(CoreError::InsufficientCash {
                    required: total,
                    received,
                });
            }
            Some(round_money(received - total))
        }
        _ => None,
    };

    let receipt = sequences::next_receipt_number(&mut *tx, state.tz, &identity.tenant_id).await?;
    let table_ref = req.pay_full_table.then(|| receipt.formatted.clone());

    let now = now_millis();
    let mut payments = Vec::with_capacity(targets.len());
    for (idx, target) in targets.iter().enumerate() {
        if !db::orders::mark_paid(&mut *tx, &identity.tenant_id, target.id, now).await? {
            // Someone else settled it between our read and this update;
            // the rollback undoes every sibling in the batch.
            return Err(CoreError::AlreadyPaid(target.id));
        }

        let receipt_number = match &table_ref {
            Some(base) => format!("{}-{}", base, idx + 1),
            None => receipt.formatted.clone(),
        };
        let early_payment = !target.status.is_open_for_payment();
        let payment = Payment {
            id: snowflake_id(),
            tenant_id: identity.tenant_id.clone(),
            order_id: target.id,
            amount: target.total,
            method: req.method,
            cash_received: (idx == 0).then_some(req.cash_received).flatten(),
            change_given: if idx == 0 {
                change.unwrap_or(Decimal::ZERO)
            } else {
                Decimal::ZERO
            },
            receipt_number,
            table_payment_ref: table_ref.clone(),
            early_payment,
            processed_by: identity.actor,
            created_at: now,
        };
        db::payments::insert(&mut *tx, &payment).await?;

        let detail = serde_json::json!({
            "order_number": target.order_number,
            "receipt_number": payment.receipt_number,
            "amount": payment.amount.to_string(),
            "method": req.method.as_str(),
            "before": target.payment_status.as_str(),
            "after": PaymentStatus::Paid.as_str(),
            "early_payment": early_payment,
        });
        db::audit::log(
            &mut *tx,
            &identity.tenant_id,
            identity.actor,
            "payment.complete",
            Some(&detail),
            now,
        )
        .await?;

        payments.push(payment);
    }

    tx.commit().await?;
    tracing::info!(
        table_id,
        orders = payments.len(),
        total = %total,
        "Payment settled"
    );

    // Post-commit side effects are best-effort; the money is recorded.
    for payment in &payments {
        state.events.publish(DomainEvent::PaymentCompleted {
            tenant_id: identity.tenant_id.clone(),
            order_id: payment.order_id,
            receipt_number: payment.receipt_number.clone(),
            amount: payment.amount,
            method: payment.method,
            timestamp: now,
        });
    }
    if let Err(e) = tables::reconcile(state, identity, table_id).await {
        tracing::warn!(table_id, error = %e, "Post-payment table reconciliation failed");
    }

    Ok(PaymentOutcome {
        total_paid: total,
        change_given: change,
        table_payment_ref: table_ref,
        payments,
    })
}

fn validate_method(req: &PaymentRequest) -> CoreResult<()> {
    match req.method {
        PaymentMethod::Cash => {
            if req.cash_received.is_none() {
                return Err(CoreError::Validation(
                    "cash_received is required for cash payments".into(),
                ));
            }
        }
        _ => {
            if req.cash_received.is_some() {
                return Err(CoreError::Validation(format!(
                    "cash_received is not accepted for {} payments",
                    req.method.as_str()
                )));
            }
        }
    }
    Ok(())
}
