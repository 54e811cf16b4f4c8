//! # GRA Providers
//!
//! Optional access to an external LLM. All supported providers speak the
//! OpenAI chat completions format and are served by `OpenAiCompatibleProvider`.
//! `GenAiService` wraps the provider and turns every failure into `None`.

pub mod genai;
pub mod openai_compatible;
pub mod provider_registry;

use async_trait::async_trait;
use gra_core::config::LlmConfig;
use gra_core::error::{GraError, Result};
use provider_registry::{AuthStyle, ProviderConfig};
use serde::{Deserialize, Serialize};

pub use genai::GenAiService;

/// Message role in a chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A chat-completion backend.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// Send messages and return the assistant's text.
    async fn chat(&self, messages: &[ChatMessage], params: &GenerateParams) -> Result<String>;
}

fn has_credentials(
    registry: &ProviderConfig,
    config: &LlmConfig,
    env: &impl Fn(&str) -> Option<String>,
) -> bool {
    registry.auth_style == AuthStyle::None
        || !config.api_key.is_empty()
        || registry.env_keys.iter().any(|k| env(k).is_some_and(|v| !v.is_empty()))
}

/// Pick a provider name: explicit config first, then the first registry
/// provider whose API key `env` can find. A provider that needs a key is
/// only picked when one is present.
pub fn resolve_provider_name(
    config: &LlmConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Option<&'static str> {
    if !config.provider.is_empty() {
        return provider_registry::get_provider_config(&config.provider)
            .filter(|p| has_credentials(p, config, &env))
            .map(|p| p.name);
    }
    provider_registry::env_providers()
        .find(|p| has_credentials(p, config, &env))
        .map(|p| p.name)
}

/// Create a provider from configuration, consulting the process environment.
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn Provider>> {
    let name = resolve_provider_name(config, |k| std::env::var(k).ok()).ok_or_else(|| {
        if config.provider.is_empty() {
            GraError::ApiKeyMissing("openai/anthropic".into())
        } else if provider_registry::get_provider_config(&config.provider).is_some() {
            GraError::ApiKeyMissing(config.provider.clone())
        } else {
            GraError::ProviderNotFound(format!(
                "{} (known: {})",
                config.provider,
                provider_registry::all_provider_names().join(", ")
            ))
        }
    })?;
    let registry = provider_registry::get_provider_config(name)
        .ok_or_else(|| GraError::ProviderNotFound(name.into()))?;
    Ok(Box::new(openai_compatible::OpenAiCompatibleProvider::from_registry(
        registry, config,
    )?))
}
