//! Catalog lookup client.
//!
//! The order workflow validates every requested product against the product
//! service and snapshots the authoritative name and price. Lookups are
//! one-shot: no retries, no caching. The HTTP client is built once at startup
//! with the catalog base URL and timeout from configuration.

use async_trait::async_trait;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Product data as observed in the catalog at lookup time.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(String),
    /// The catalog could not be reached or answered with something other
    /// than a product. Callers treat this the same as a missing product.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn lookup(&self, product_id: &str) -> Result<ProductSnapshot, CatalogError>;
}

/// HTTP implementation backed by the product service.
#[derive(Clone, Debug)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn lookup(&self, product_id: &str) -> Result<ProductSnapshot, CatalogError> {
        let url = format!(
            "{}/api/v1/products/{}",
            self.base_url.trim_end_matches('/'),
            product_id
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| CatalogError::Unavailable(err.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound(product_id.to_string())),
            status if !status.is_success() => Err(CatalogError::Unavailable(format!(
                "catalog returned {status}"
            ))),
            _ => response
                .json()
                .await
                .map_err(|err| CatalogError::Unavailable(err.to_string())),
        }
    }
}
