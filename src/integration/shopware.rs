//! Shop-Ware adapter.
//!
//! Updates the service order's technician notes; educational video links are
//! appended to the note so they reach the customer through Shop-Ware's
//! notification flow.

use super::{DiagnosticPayload, ShopIntegration};
use crate::error::{Result, VerkstedError};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.shopwareconnect.com/v2";

pub struct ShopWareIntegration {
    client: reqwest::Client,
    api_key: String,
    location_id: String,
    base_url: String,
}

impl ShopWareIntegration {
    pub fn new(api_key: String, location_id: String, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            location_id,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn note_with_videos(payload: &DiagnosticPayload) -> String {
        let mut note = payload.as_note();

        if let Some(videos) = &payload.educational_videos {
            if !videos.is_empty() {
                note.push_str("\n\nHelpful videos:\n");
                for video in videos {
                    note.push_str(&format!("{}: {}\n", video.title, video.url));
                }
            }
        }

        note
    }
}

#[async_trait]
impl ShopIntegration for ShopWareIntegration {
    fn name(&self) -> &'static str {
        "shopware"
    }

    async fn push_diagnostic(
        &self,
        external_order_id: &str,
        payload: &DiagnosticPayload,
    ) -> Result<()> {
        self.client
            .patch(format!(
                "{}/service-orders/{}",
                self.base_url, external_order_id
            ))
            .header("Authorization", format!("ApiKey {}", self.api_key))
            .header("X-Location-ID", &self.location_id)
            .json(&json!({
                "technicianNotes": Self::note_with_videos(payload),
            }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| VerkstedError::Integration(format!("Shop-Ware push failed: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::VideoLink;

    #[test]
    fn test_note_includes_video_links() {
        let payload = DiagnosticPayload {
            diagnosis: "Worn brake pads".to_string(),
            recommended_parts: vec![],
            estimated_cost: 350.0,
            confidence: 75,
            educational_videos: Some(vec![VideoLink {
                title: "Brake pad replacement".to_string(),
                url: "https://youtube.com/watch?v=abc".to_string(),
            }]),
        };

        let note = ShopWareIntegration::note_with_videos(&payload);
        assert!(note.contains("Helpful videos:"));
        assert!(note.contains("https://youtube.com/watch?v=abc"));
    }
}
