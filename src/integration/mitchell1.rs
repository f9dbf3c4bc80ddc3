//! Mitchell 1 adapter.
//!
//! Pushes the diagnostic as a typed note on the repair order, with the full
//! structured payload attached as metadata.

use super::{DiagnosticPayload, ShopIntegration};
use crate::error::{Result, VerkstedError};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.mitchell1.com/v2";

pub struct Mitchell1Integration {
    client: reqwest::Client,
    api_key: String,
    shop_id: String,
    base_url: String,
}

impl Mitchell1Integration {
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
impl ShopIntegration for Mitchell1Integration {
    fn name(&self) -> &'static str {
        "mitchell1"
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
                "type": "ai_diagnostic",
                "content": payload.as_note(),
                "metadata": payload,
            }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| VerkstedError::Integration(format!("Mitchell 1 push failed: {}", e)))?;

        Ok(())
    }
}
