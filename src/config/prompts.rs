//! Prompt templates for Verksted.
//!
//! Prompts can be customized by placing a `prompts.toml` in the custom
//! prompts directory configured in settings.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub diagnosis: DiagnosisPrompts,
}

/// Prompts for diagnosis generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisPrompts {
    /// Role framing prepended to every diagnosis prompt.
    pub system: String,
    /// User template. Available placeholders: {{vehicle}}, {{symptoms}},
    /// {{context_section}}.
    pub user: String,
}

impl Default for DiagnosisPrompts {
    fn default() -> Self {
        Self {
            system: "You are an expert automotive diagnostic technician. Analyze the reported \
symptoms and provide a diagnosis."
                .to_string(),

            user: r#"Vehicle: {{vehicle}}
Symptoms: {{symptoms}}
{{context_section}}
Provide a diagnosis with:
1. Clear explanation of the problem
2. Recommended parts needed
3. Estimated cost in USD
4. Confidence level (0-100)

Return ONLY valid JSON:
{
  "diagnosis": "explanation",
  "recommendedParts": ["part1", "part2"],
  "estimatedCost": 150.00,
  "confidence": 85
}"#
            .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, applying overrides from `prompts.toml` in the custom
    /// directory when present.
    pub fn load(custom_dir: Option<&str>) -> Result<Self> {
        let defaults = Prompts::default();

        let Some(dir) = custom_dir else {
            return Ok(defaults);
        };

        let path = Path::new(dir).join("prompts.toml");
        if !path.exists() {
            return Ok(defaults);
        }

        let content = std::fs::read_to_string(&path)?;
        let prompts: Prompts = toml::from_str(&content)?;
        Ok(prompts)
    }

    /// Render a template by substituting `{{name}}` placeholders.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut rendered = template.to_string();
        for (name, value) in vars {
            rendered = rendered.replace(&format!("{{{{{}}}}}", name), value);
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholders() {
        let mut vars = HashMap::new();
        vars.insert("vehicle".to_string(), "2019 Honda Civic".to_string());

        let rendered = Prompts::render("Vehicle: {{vehicle}}", &vars);
        assert_eq!(rendered, "Vehicle: 2019 Honda Civic");
    }

    #[test]
    fn test_default_user_prompt_demands_json() {
        let prompts = Prompts::default();
        assert!(prompts.diagnosis.user.contains("ONLY valid JSON"));
        assert!(prompts.diagnosis.user.contains("recommendedParts"));
    }
}
