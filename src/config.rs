//! Process configuration.
//!
//! Every value can be overridden through environment variables:
//!
//! | Variable              | Default                 |
//! |-----------------------|-------------------------|
//! | `PORT`                | `8084`                  |
//! | `DATABASE_URL`        | required                |
//! | `PRODUCT_SERVICE_URL` | `http://localhost:8082` |
//! | `CATALOG_TIMEOUT_MS`  | `5000`                  |

use anyhow::Context;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Base URL of the product service; injected into the catalog client
    /// once at startup.
    pub product_service_url: String,
    pub catalog_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8084),
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            product_service_url: std::env::var("PRODUCT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8082".into()),
            catalog_timeout_ms: std::env::var("CATALOG_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        })
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_millis(self.catalog_timeout_ms)
    }
}
