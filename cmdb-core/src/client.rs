//! HTTP client for the inventory backend.
//!
//! [`RecordSource`] is the single capability the fetcher needs from its
//! environment: GET an endpoint and hand back the parsed listing.

use crate::config::CmdbConfig;
use crate::error::{InventoryError, Result};
use crate::record::{parse_records, ResourceRecord};
use async_trait::async_trait;
use reqwest::Client;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(&self, endpoint: &str) -> Result<Vec<ResourceRecord>>;
}

#[derive(Debug, Clone)]
pub struct InventoryClient {
    base_url: String,
    client: Client,
}

impl InventoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: Client::new(),
        }
    }

    /// Client with the configured base URL and, on native targets, the
    /// configured request timeout.
    pub fn from_config(config: &CmdbConfig) -> Result<Self> {
        let builder = Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.request_timeout() {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        let client = builder
            .build()
            .map_err(|e| InventoryError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: normalize_base_url(&config.api_base_url),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    pub async fn get_records(&self, endpoint: &str) -> Result<Vec<ResourceRecord>> {
        let url = self.url_for(endpoint);
        log::debug!("📡 [HTTP] GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.ok();
            log::warn!("❌ [HTTP] GET {} returned {}", url, status);
            return Err(InventoryError::http(status.as_u16(), body));
        }

        let body = response.text().await?;
        let records = parse_records(&body)?;
        log::debug!("✅ [HTTP] GET {} returned {} records", url, records.len());
        Ok(records)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecordSource for InventoryClient {
    async fn fetch_records(&self, endpoint: &str) -> Result<Vec<ResourceRecord>> {
        self.get_records(endpoint).await
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_without_double_slash() {
        let client = InventoryClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url_for("/api/vms"), "http://localhost:8080/api/vms");
        assert_eq!(client.url_for("api/vms"), "http://localhost:8080/api/vms");
    }

    #[test]
    fn test_from_config_uses_configured_base_url() {
        let config = CmdbConfig {
            api_base_url: "http://inventory.internal:9000".to_string(),
            ..CmdbConfig::default()
        };
        let client = InventoryClient::from_config(&config).unwrap();
        assert_eq!(
            client.url_for("/api/sqlservers"),
            "http://inventory.internal:9000/api/sqlservers"
        );
    }
}
