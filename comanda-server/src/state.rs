//! Application state

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::config::{ChargeRates, Config};
use crate::events::EventBus;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Domain event publisher
    pub events: EventBus,
    /// Business timezone for sequence rollover
    pub tz: chrono_tz::Tz,
    /// Rates snapshotted into newly created orders
    pub rates: ChargeRates,
}

impl AppState {
    /// Create a new AppState: connect the pool and run migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = connect(&config.database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            pool,
            events: EventBus::new(),
            tz: config.timezone,
            rates: config.rates.clone(),
        })
    }
}

/// Open the SQLite pool with WAL and a busy timeout so concurrent
/// writers queue instead of failing fast.
async fn connect(database_url: &str) -> Result<SqlitePool, BoxError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}
