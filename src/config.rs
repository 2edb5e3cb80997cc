use std::env;

use anyhow::Context;

use crate::{domain::catalog::Catalog, money::Money};

const DEFAULT_DELIVERY_FEE: Money = Money::from_pesos(50);
const DEFAULT_ORDER_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub checkout: CheckoutConfig,
    pub catalog_path: Option<String>,
}

/// Checkout knobs shared by every customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub delivery_fee: Money,
    pub order_history_limit: usize,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            delivery_fee: DEFAULT_DELIVERY_FEE,
            order_history_limit: DEFAULT_ORDER_HISTORY_LIMIT,
        }
    }
}

impl CheckoutConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let delivery_fee = match env::var("DELIVERY_FEE") {
            Ok(raw) => parse_delivery_fee(&raw)?,
            Err(_) => DEFAULT_DELIVERY_FEE,
        };
        let order_history_limit = env::var("ORDER_HISTORY_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_ORDER_HISTORY_LIMIT);
        Ok(Self {
            delivery_fee,
            order_history_limit,
        })
    }
}

fn parse_delivery_fee(raw: &str) -> anyhow::Result<Money> {
    let fee = Money::parse(raw).context("DELIVERY_FEE must be an amount like 50.00")?;
    anyhow::ensure!(fee >= Money::ZERO, "DELIVERY_FEE cannot be negative");
    Ok(fee)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let catalog_path = env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty());
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            checkout: CheckoutConfig::from_env()?,
            catalog_path,
        })
    }
}

impl AppConfig {
    /// The catalog at `CATALOG_PATH`, or the built-in one.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match &self.catalog_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading catalog {path}"))?;
                let catalog = Catalog::from_json(&raw)
                    .with_context(|| format!("parsing catalog {path}"))?;
                tracing::info!(
                    path,
                    shops = catalog.shops.len(),
                    products = catalog.products.len(),
                    "catalog loaded"
                );
                Ok(catalog)
            }
            None => Ok(Catalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_fee_must_be_a_non_negative_amount() {
        assert_eq!(parse_delivery_fee("₱5.99").ok(), Some(Money::from_centavos(599)));
        assert_eq!(parse_delivery_fee("0").ok(), Some(Money::ZERO));
        assert!(parse_delivery_fee("-50").is_err());
        assert!(parse_delivery_fee("fifty").is_err());
    }
}
