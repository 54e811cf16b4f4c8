//! OpenAI-compatible chat completions client.
//!
//! OpenAI and Anthropic (through its OpenAI-compatible endpoint) are handled by
//! the same struct; they differ only by base URL, API key and default model.

use async_trait::async_trait;
use gra_core::config::LlmConfig;
use gra_core::error::{GraError, Result};
use serde_json::{Value, json};

use crate::provider_registry::{AuthStyle, ProviderConfig};
use crate::{ChatMessage, GenerateParams, Provider};

pub struct OpenAiCompatibleProvider {
    name: String,
    api_key: String,
    base_url: String,
    chat_path: String,
    auth_style: AuthStyle,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    /// Create from a registry entry plus LLM config.
    ///
    /// Resolution order:
    /// - API key: `config.api_key` > registry env vars > empty
    /// - Base URL: `config.endpoint` > registry default
    /// - Model: `config.model` > registry default
    pub fn from_registry(registry: &ProviderConfig, config: &LlmConfig) -> Result<Self> {
        let api_key = if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            registry
                .env_keys
                .iter()
                .find_map(|key| std::env::var(key).ok())
                .unwrap_or_default()
        };

        let base_url = if !config.endpoint.is_empty() {
            config.endpoint.trim_end_matches('/').to_string()
        } else {
            registry.base_url.to_string()
        };

        let model = if !config.model.is_empty() {
            config.model.clone()
        } else {
            registry.default_model.to_string()
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GraError::Http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: registry.name.to_string(),
            api_key,
            base_url,
            chat_path: registry.chat_path.to_string(),
            auth_style: registry.auth_style,
            model,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_style {
            AuthStyle::Bearer if !self.api_key.is_empty() => {
                req.header("Authorization", format!("Bearer {}", self.api_key))
            }
            _ => req,
        }
    }
}

#[async_trait]
impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(&self, messages: &[ChatMessage], params: &GenerateParams) -> Result<String> {
        if self.auth_style != AuthStyle::None && self.api_key.is_empty() {
            return Err(GraError::ApiKeyMissing(self.name.clone()));
        }

        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
        });

        let url = format!("{}{}", self.base_url, self.chat_path);
        let req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        let req = self.apply_auth(req);

        let resp = req.send().await.map_err(|e| {
            GraError::Http(format!("{} connection failed ({}): {}", self.name, url, e))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(GraError::Provider(format!(
                "{} API error {}: {}",
                self.name, status, text
            )));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| GraError::Http(e.to_string()))?;

        let choice = json["choices"]
            .get(0)
            .ok_or_else(|| GraError::Provider("No choices in response".into()))?;

        choice["message"]["content"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| GraError::Provider("Empty message content".into()))
    }
}
