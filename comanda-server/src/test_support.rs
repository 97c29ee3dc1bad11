//! Shared fixtures for the service-level tests

use rust_decimal::Decimal;
use shared::models::{
    Actor, CartItem, DiningTable, Identity, Order, OrderStatus, PaymentStatus, TableStatus,
};
use shared::util::{now_millis, snowflake_id};
use tempfile::TempDir;

use crate::config::{ChargeRates, Config};
use crate::db;
use crate::state::AppState;

pub struct TestCtx {
    pub state: AppState,
    _tmp: TempDir,
}

/// Fresh migrated state backed by a temp-dir SQLite file
pub async fn test_state() -> TestCtx {
    let tmp = TempDir::new().expect("create temp dir");
    let db_path = tmp.path().join("comanda-test.db");
    let config = Config {
        database_url: format!("sqlite:{}", db_path.display()),
        http_port: 0,
        timezone: chrono_tz::Europe::Madrid,
        rates: ChargeRates {
            tax_rate: Decimal::from(10),
            tax_label: "IVA 10%".into(),
            service_charge_rate: Decimal::ZERO,
            service_charge_label: "Service".into(),
        },
    };
    let state = AppState::new(&config).await.expect("init test state");
    TestCtx { state, _tmp: tmp }
}

pub fn staff_identity(tenant: &str) -> Identity {
    Identity::new(tenant, Actor::Staff(100))
}

pub fn cart_item(name: &str, unit_price: &str, quantity: i32) -> CartItem {
    CartItem {
        item_name: name.into(),
        unit_price: unit_price.parse().unwrap(),
        quantity,
    }
}

pub async fn seed_table(state: &AppState, tenant: &str, status: TableStatus) -> i64 {
    let table = DiningTable {
        id: snowflake_id(),
        tenant_id: tenant.into(),
        name: "T1".into(),
        status,
        updated_at: now_millis(),
    };
    let mut conn = state.pool.acquire().await.unwrap();
    db::tables::insert(&mut conn, &table).await.unwrap();
    table.id
}

impl TestCtx {
    /// Insert an order row directly, bypassing the creation service
    pub async fn seed_order(
        &self,
        tenant: &str,
        table_id: i64,
        status: OrderStatus,
        total: &str,
    ) -> i64 {
        let total: Decimal = total.parse().unwrap();
        let now = now_millis();
        let id = snowflake_id();
        let order = Order {
            id,
            tenant_id: tenant.into(),
            table_id,
            customer_session_id: None,
            order_number: format!("ORD-TEST-{id}"),
            daily_sequence_value: 0,
            status,
            payment_status: PaymentStatus::Pending,
            subtotal: total,
            tax_amount: Decimal::ZERO,
            service_charge: Decimal::ZERO,
            total,
            tax_rate: Decimal::ZERO,
            tax_label: "IVA".into(),
            service_charge_rate: Decimal::ZERO,
            service_charge_label: "Service".into(),
            created_at: now,
            updated_at: now,
        };
        let mut conn = self.state.pool.acquire().await.unwrap();
        db::orders::insert_order(&mut conn, &order).await.unwrap();
        id
    }
}
