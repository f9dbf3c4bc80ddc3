//! Structured diagnosis generation.
//!
//! Combines symptom text, optional vehicle metadata, and retrieved knowledge
//! context into an LLM prompt, then parses the structured result. Never fails
//! outward: any provider or parse failure degrades to the rule-based fallback.

mod extract;
mod fallback;

pub use extract::extract_json_object;
pub use fallback::fallback_diagnosis;

use crate::completion::Completer;
use crate::config::Prompts;
use crate::error::{Result, VerkstedError};
use crate::rag::ContextBuilder;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A structured diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    /// Explanation of the probable problem.
    pub diagnosis: String,
    /// Parts recommended for the repair.
    pub recommended_parts: Vec<String>,
    /// Estimated repair cost in USD. Never negative; 0 when unknown.
    pub estimated_cost: f64,
    /// Confidence level in [0, 100].
    pub confidence: u8,
}

/// Optional vehicle context for a diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub year: i32,
    pub make: String,
    pub model: String,
}

impl VehicleInfo {
    /// Human-readable description, e.g. "2019 Honda Civic".
    pub fn describe(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }

    /// Validate plausibility of the vehicle fields.
    pub fn validate(&self) -> Result<()> {
        let max_year = Utc::now().year() + 1;
        if self.year < 1900 || self.year > max_year {
            return Err(VerkstedError::InvalidInput(format!(
                "Vehicle year {} outside plausible range 1900-{}",
                self.year, max_year
            )));
        }
        if self.make.trim().is_empty() || self.model.trim().is_empty() {
            return Err(VerkstedError::InvalidInput(
                "Vehicle make and model must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generates structured diagnoses from symptom descriptions.
pub struct DiagnosisGenerator {
    context_builder: ContextBuilder,
    completer: Option<Arc<dyn Completer>>,
    prompts: Prompts,
}

impl DiagnosisGenerator {
    /// Create a new generator.
    ///
    /// `completer` is optional: without one, every request resolves through
    /// the rule-based fallback.
    pub fn new(context_builder: ContextBuilder, completer: Option<Arc<dyn Completer>>) -> Self {
        Self {
            context_builder,
            completer,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Generate a diagnosis. Always returns a well-formed result.
    #[instrument(skip(self, symptom_text))]
    pub async fn generate(
        &self,
        symptom_text: &str,
        vehicle: Option<&VehicleInfo>,
    ) -> DiagnosisResult {
        let Some(completer) = &self.completer else {
            debug!("No completion provider configured, using fallback rules");
            return fallback_diagnosis(symptom_text);
        };

        let context = self.context_builder.build(symptom_text).await;
        let prompt = self.compose_prompt(symptom_text, vehicle, &context);

        let raw = match completer.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Completion failed, using fallback rules: {}", e);
                return fallback_diagnosis(symptom_text);
            }
        };

        match parse_diagnosis_response(&raw) {
            Ok(result) => result,
            Err(e) => {
                warn!("Unparseable completion, using fallback rules: {}", e);
                fallback_diagnosis(symptom_text)
            }
        }
    }

    fn compose_prompt(
        &self,
        symptom_text: &str,
        vehicle: Option<&VehicleInfo>,
        context: &str,
    ) -> String {
        let vehicle_desc = vehicle
            .map(VehicleInfo::describe)
            .unwrap_or_else(|| "unknown vehicle".to_string());

        let context_section = if context.is_empty() {
            String::new()
        } else {
            format!("\nRelevant repair knowledge:\n{}\n", context)
        };

        let mut vars = HashMap::new();
        vars.insert("vehicle".to_string(), vehicle_desc);
        vars.insert("symptoms".to_string(), symptom_text.to_string());
        vars.insert("context_section".to_string(), context_section);

        format!(
            "{}\n\n{}",
            self.prompts.diagnosis.system,
            Prompts::render(&self.prompts.diagnosis.user, &vars)
        )
    }
}

/// Parse a raw completion into a diagnosis, applying field-by-field defaults.
///
/// Fails only when no parseable JSON object is present at all; absent fields
/// fall back to documented defaults.
pub fn parse_diagnosis_response(raw: &str) -> Result<DiagnosisResult> {
    let json = extract_json_object(raw).ok_or_else(|| {
        VerkstedError::Validation("No JSON object found in completion output".to_string())
    })?;

    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| VerkstedError::Validation(format!("Malformed JSON payload: {}", e)))?;

    let diagnosis = value
        .get("diagnosis")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("Unable to determine")
        .to_string();

    let recommended_parts = value
        .get("recommendedParts")
        .and_then(|v| v.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    let estimated_cost = value
        .get("estimatedCost")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
        .max(0.0);

    let confidence = value
        .get("confidence")
        .and_then(|v| v.as_i64())
        .unwrap_or(0)
        .clamp(0, 100) as u8;

    Ok(DiagnosisResult {
        diagnosis,
        recommended_parts,
        estimated_cost,
        confidence,
    })
}
