//! OpenAI-compatible chat-completions client.
//!
//! Sends a rendered prompt plus the declared output schema to a
//! `/chat/completions` endpoint and extracts the completion as JSON.
//! The endpoint, model, and timeout come from
//! [`GenerationConfig`](crate::store::GenerationConfig); the API key
//! comes from the OS keyring.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{keyring_store, GenerationProvider};
use crate::error::GenerationError;
use crate::store::GenerationConfig;

/// Keyring entry holding the generation service API key.
pub const API_KEY_ENTRY: &str = "generation_api_key";

/// OpenAI-compatible generation client.
pub struct OpenAiClient {
    client: Client,
    endpoint: Url,
    model: String,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty, the endpoint is not a valid
    /// URL, or the HTTP client cannot be built.
    pub fn new(config: &GenerationConfig, api_key: String) -> Result<Self, GenerationError> {
        if api_key.is_empty() {
            return Err(GenerationError::NotConfigured(
                "API key is empty. Run `cogniwell auth set-key` first.".to_string(),
            ));
        }

        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| GenerationError::NotConfigured(format!("invalid endpoint: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            api_key,
        })
    }

    /// Create a client with the API key loaded from the OS keyring.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::NotConfigured`] if no key is stored.
    pub fn from_keyring(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = keyring_store::get(API_KEY_ENTRY)
            .map_err(|e| GenerationError::NotConfigured(format!("keyring error: {e}")))?
            .ok_or_else(|| {
                GenerationError::NotConfigured(
                    "No API key stored. Run `cogniwell auth set-key` first.".to_string(),
                )
            })?;
        Self::new(config, api_key)
    }

    fn completions_url(&self) -> Result<Url, GenerationError> {
        // Endpoint is a base like https://api.openai.com/v1
        let base = if self.endpoint.path().ends_with('/') {
            self.endpoint.clone()
        } else {
            let mut with_slash = self.endpoint.clone();
            with_slash.set_path(&format!("{}/", self.endpoint.path()));
            with_slash
        };
        base.join("chat/completions")
            .map_err(|e| GenerationError::NotConfigured(format!("invalid endpoint: {e}")))
    }

    /// Strip a Markdown code fence if the model wrapped its JSON in one.
    fn strip_code_fence(content: &str) -> &str {
        let trimmed = content.trim();
        let Some(rest) = trimmed.strip_prefix("```") else {
            return trimmed;
        };
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        rest.strip_suffix("```").unwrap_or(rest).trim()
    }
}

#[async_trait]
impl GenerationProvider for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        output_schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GenerationError> {
        let system = format!(
            "You are a personal productivity assistant. Respond with a single JSON object \
             and nothing else. The object must conform to this JSON schema:\n{}",
            serde_json::to_string_pretty(output_schema)
                .map_err(|e| GenerationError::Request(e.to_string()))?
        );

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt },
            ],
            "response_format": { "type": "json_object" },
        });

        let url = self.completions_url()?;
        debug!(model = %self.model, "dispatching generation request");

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(GenerationError::Api { status, message });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedOutput(e.to_string()))?;

        let content = payload
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| {
                GenerationError::MalformedOutput("no message content in response".to_string())
            })?;

        let content = Self::strip_code_fence(content);
        if content.is_empty() {
            return Err(GenerationError::EmptyOutput);
        }

        serde_json::from_str(content)
            .map_err(|e| GenerationError::MalformedOutput(format!("completion is not JSON: {e}")))
    }
}
