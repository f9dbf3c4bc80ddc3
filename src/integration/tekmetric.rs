//! Tekmetric adapter.
//!
//! Modern REST API with bearer-token auth and a per-shop header. The
//! diagnostic lands as a customer-visible note on the repair order.

use super::{DiagnosticPayload, ShopIntegration};
use crate::error::{Result, VerkstedError};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.tekmetric.com/api/v1";

pub struct TekmetricIntegration {
    client: reqwest::Client,
    api_key: String,
    shop_id: String,
    base_url: String,
}

impl TekmetricIntegration {
    pub fn new(api_key: String, shop_id: String, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            shop_id,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[async_trait]
impl ShopIntegration for TekmetricIntegration {
    fn name(&self) -> &'static str {
        "tekmetric"
    }

    async fn push_diagnostic(
        &self,
        external_order_id: &str,
        payload: &DiagnosticPayload,
    ) -> Result<()> {
        self.client
            .post(format!(
                "{}/repair-orders/{}/notes",
                self.base_url, external_order_id
            ))
            .bearer_auth(&self.api_key)
            .header("X-Shop-ID", &self.shop_id)
            .json(&json!({
                "note": payload.as_note(),
                "isInternal": false,
            }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| VerkstedError::Integration(format!("Tekmetric push failed: {}", e)))?;

        Ok(())
    }
}
