//! OpenAI chat completion implementation.

use super::Completer;
use crate::error::{Result, VerkstedError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::instrument;

/// OpenAI-based completion provider.
pub struct OpenAICompleter {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAICompleter {
    /// Create a new completer with default settings.
    pub fn new() -> Self {
        Self::with_config("gpt-4o-mini", 0.3)
    }

    /// Create a new completer with a custom model and temperature.
    ///
    /// Low temperature is the default since the output must be parseable
    /// JSON, not creative prose.
    pub fn with_config(model: &str, temperature: f32) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            temperature,
        }
    }
}

impl Default for OpenAICompleter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Completer for OpenAICompleter {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()
                .map_err(|e| VerkstedError::Provider(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| VerkstedError::Provider(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            VerkstedError::OpenAI(format!("Failed to generate completion: {}", e))
        })?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| VerkstedError::Provider("Empty response from LLM".to_string()))
    }
}
