//! Shop-management system sinks.
//!
//! Finished diagnostics are pushed to whichever shop-management system the
//! organization uses. Every adapter consumes the same payload shape; the
//! manager selects one from configuration and isolates push failures.

mod mitchell1;
mod shopware;
mod tekmetric;

pub use mitchell1::Mitchell1Integration;
pub use shopware::ShopWareIntegration;
pub use tekmetric::TekmetricIntegration;

use crate::config::IntegrationSettings;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// The uniform payload pushed to external systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticPayload {
    pub diagnosis: String,
    pub recommended_parts: Vec<String>,
    pub estimated_cost: f64,
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educational_videos: Option<Vec<VideoLink>>,
}

/// A titled video link included in customer-facing pushes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoLink {
    pub title: String,
    pub url: String,
}

impl DiagnosticPayload {
    /// Render the payload as a technician-readable note.
    pub fn as_note(&self) -> String {
        format!(
            "AI Diagnosis ({}% confidence):\n\n{}\n\nRecommended Parts:\n{}\n\nEstimated Cost: ${:.2}",
            self.confidence,
            self.diagnosis,
            self.recommended_parts.join("\n"),
            self.estimated_cost
        )
    }
}

/// Trait for shop-management system adapters.
#[async_trait]
pub trait ShopIntegration: Send + Sync {
    /// Adapter name for logging and sync records.
    fn name(&self) -> &'static str;

    /// Push a diagnostic result to an existing order in the external system.
    async fn push_diagnostic(
        &self,
        external_order_id: &str,
        payload: &DiagnosticPayload,
    ) -> Result<()>;
}

/// Outcome of a sync attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Pushed successfully.
    Synced,
    /// No integration configured or it is disabled.
    Skipped,
    /// Push failed; the error message is preserved for the sync log.
    Failed(String),
}

/// Selects and drives the configured integration.
pub struct IntegrationManager {
    integration: Option<Box<dyn ShopIntegration>>,
}

impl IntegrationManager {
    /// Build a manager from settings. Unknown or disabled integrations
    /// resolve to a no-op manager.
    pub fn from_settings(settings: &IntegrationSettings) -> Self {
        if !settings.enabled {
            return Self { integration: None };
        }

        let integration: Option<Box<dyn ShopIntegration>> =
            match settings.integration_type.as_str() {
                "tekmetric" => Some(Box::new(TekmetricIntegration::new(
                    settings.api_key.clone(),
                    settings.shop_id.clone(),
                    settings.base_url.clone(),
                ))),
                "mitchell1" => Some(Box::new(Mitchell1Integration::new(
                    settings.api_key.clone(),
                    settings.shop_id.clone(),
                    settings.base_url.clone(),
                ))),
                "shopware" => Some(Box::new(ShopWareIntegration::new(
                    settings.api_key.clone(),
                    settings
                        .location_id
                        .clone()
                        .unwrap_or_else(|| settings.shop_id.clone()),
                    settings.base_url.clone(),
                ))),
                _ => None,
            };

        Self { integration }
    }

    /// Create a manager around an explicit adapter (useful for testing).
    pub fn with_integration(integration: Box<dyn ShopIntegration>) -> Self {
        Self {
            integration: Some(integration),
        }
    }

    /// Whether an integration is configured.
    pub fn is_configured(&self) -> bool {
        self.integration.is_some()
    }

    /// Push a diagnostic result, converting failure into a reportable
    /// outcome rather than an error.
    pub async fn sync_diagnostic(
        &self,
        external_order_id: &str,
        payload: &DiagnosticPayload,
    ) -> SyncOutcome {
        let Some(integration) = &self.integration else {
            info!("No integration configured, skipping sync");
            return SyncOutcome::Skipped;
        };

        match integration.push_diagnostic(external_order_id, payload).await {
            Ok(()) => {
                info!(
                    integration = integration.name(),
                    order = external_order_id,
                    "Diagnostic pushed"
                );
                SyncOutcome::Synced
            }
            Err(e) => {
                error!(
                    integration = integration.name(),
                    order = external_order_id,
                    "Integration sync failed: {}",
                    e
                );
                SyncOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerkstedError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct RecordingIntegration {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl ShopIntegration for RecordingIntegration {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn push_diagnostic(
            &self,
            _external_order_id: &str,
            _payload: &DiagnosticPayload,
        ) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(VerkstedError::Integration("upstream 500".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn payload() -> DiagnosticPayload {
        DiagnosticPayload {
            diagnosis: "Worn brake pads".to_string(),
            recommended_parts: vec!["Brake Pad Set".to_string()],
            estimated_cost: 350.0,
            confidence: 75,
            educational_videos: None,
        }
    }

    #[tokio::test]
    async fn test_sync_success_and_failure_outcomes() {
        let calls = Arc::new(AtomicUsize::new(0));

        let ok = IntegrationManager::with_integration(Box::new(RecordingIntegration {
            calls: calls.clone(),
            fail: false,
        }));
        assert_eq!(ok.sync_diagnostic("RO-1", &payload()).await, SyncOutcome::Synced);

        let failing = IntegrationManager::with_integration(Box::new(RecordingIntegration {
            calls: calls.clone(),
            fail: true,
        }));
        assert!(matches!(
            failing.sync_diagnostic("RO-1", &payload()).await,
            SyncOutcome::Failed(_)
        ));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unconfigured_manager_skips() {
        let manager = IntegrationManager::from_settings(&IntegrationSettings::default());
        assert!(!manager.is_configured());
        assert_eq!(
            manager.sync_diagnostic("RO-1", &payload()).await,
            SyncOutcome::Skipped
        );
    }

    #[test]
    fn test_note_rendering() {
        let note = payload().as_note();
        assert!(note.contains("75% confidence"));
        assert!(note.contains("Brake Pad Set"));
        assert!(note.contains("$350.00"));
    }

    #[test]
    fn test_payload_serializes_to_external_shape() {
        let json = serde_json::to_value(payload()).unwrap();
        assert!(json.get("recommendedParts").is_some());
        assert!(json.get("estimatedCost").is_some());
        assert!(json.get("educationalVideos").is_none());
    }
}
