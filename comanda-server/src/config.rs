//! Server configuration

use rust_decimal::Decimal;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Tax and service-charge rates snapshotted into new orders
///
/// Changing these only affects orders created afterwards; existing
/// orders keep the rates they were created with.
#[derive(Debug, Clone)]
pub struct ChargeRates {
    /// Percent, e.g. 10 for 10% IVA
    pub tax_rate: Decimal,
    pub tax_label: String,
    /// Percent, 0 disables the service charge line
    pub service_charge_rate: Decimal,
    pub service_charge_label: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Business timezone for daily sequence rollover
    pub timezone: chrono_tz::Tz,
    pub rates: ChargeRates,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let timezone: chrono_tz::Tz = std::env::var("TIMEZONE")
            .unwrap_or_else(|_| "Europe/Madrid".into())
            .parse()
            .map_err(|e| format!("invalid TIMEZONE: {e}"))?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:comanda.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            timezone,
            rates: ChargeRates {
                tax_rate: parse_rate("TAX_RATE", "10")?,
                tax_label: std::env::var("TAX_LABEL").unwrap_or_else(|_| "IVA 10%".into()),
                service_charge_rate: parse_rate("SERVICE_CHARGE_RATE", "0")?,
                service_charge_label: std::env::var("SERVICE_CHARGE_LABEL")
                    .unwrap_or_else(|_| "Service".into()),
            },
        })
    }
}

fn parse_rate(name: &str, default: &str) -> Result<Decimal, BoxError> {
    let raw = std::env::var(name).unwrap_or_else(|_| default.into());
    let rate: Decimal = raw.parse().map_err(|e| format!("invalid {name}: {e}"))?;
    if rate.is_sign_negative() {
        return Err(format!("{name} must be non-negative").into());
    }
    Ok(rate)
}
