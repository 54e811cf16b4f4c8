//! Best-effort generation service.
//!
//! Nothing here returns an error to the caller: an unconfigured service, a
//! network failure or a malformed reply all come back as `None` and are logged.

use gra_core::config::LlmConfig;

use crate::{ChatMessage, GenerateParams, Provider, create_provider};

const SYSTEM_PROMPT: &str = "You are an expert agricultural AI assistant specializing in climate adaptation and sustainable farming.";

/// Token budget for chat-assistant replies.
pub const CHAT_MAX_TOKENS: u32 = 500;

pub struct GenAiService {
    provider: Option<Box<dyn Provider>>,
    temperature: f32,
    max_tokens: u32,
}

impl GenAiService {
    /// Build from config. Falls back to a disabled service when no provider
    /// can be resolved.
    pub fn from_config(config: &LlmConfig) -> Self {
        let provider = match create_provider(config) {
            Ok(p) => {
                tracing::info!("🧠 GenAI provider enabled: {}", p.name());
                Some(p)
            }
            Err(e) => {
                tracing::info!("GenAI disabled ({e}); using templated responses");
                None
            }
        };
        Self {
            provider,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// A service that never calls out.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            temperature: LlmConfig::default().temperature,
            max_tokens: LlmConfig::default().max_tokens,
        }
    }

    pub fn with_provider(provider: Box<dyn Provider>, config: &LlmConfig) -> Self {
        Self {
            provider: Some(provider),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    /// Send `prompt` as a user message under the agricultural system prompt.
    pub async fn generate(&self, prompt: &str, max_tokens: u32) -> Option<String> {
        let provider = self.provider.as_deref()?;
        let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];
        let params = GenerateParams {
            temperature: self.temperature,
            max_tokens,
        };
        match provider.chat(&messages, &params).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("⚠️ {} generation failed: {e}", provider.name());
                None
            }
        }
    }

    /// Answer a RAG prompt built by the prompt templates.
    pub async fn complete_rag(&self, prompt: &str) -> Option<String> {
        self.generate(prompt, self.max_tokens).await
    }

    /// Chat-assistant reply with optional farm context.
    pub async fn chat_response(
        &self,
        message: &str,
        location: Option<&str>,
        farm_size: Option<&str>,
    ) -> Option<String> {
        if !self.is_available() {
            return None;
        }
        self.generate(&chat_prompt(message, location, farm_size), CHAT_MAX_TOKENS)
            .await
    }
}

fn chat_prompt(message: &str, location: Option<&str>, farm_size: Option<&str>) -> String {
    let context = match location {
        Some(loc) if !loc.is_empty() => format!(
            "\nUser's farm context: Location: {loc}, Farm size: {} acres",
            farm_size.unwrap_or("unknown")
        ),
        _ => String::new(),
    };
    format!(
        "You are GRA (Generative Resilience Agent), an AI assistant helping farmers with climate adaptation.\n\nUser question: {message}\n{context}\n\nProvide a helpful, practical response with specific recommendations. Be concise but informative."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gra_core::error::{GraError, Result};
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<(Vec<ChatMessage>, GenerateParams)>>>;

    struct ScriptedProvider {
        reply: Option<String>,
        seen: Calls,
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn chat(&self, messages: &[ChatMessage], params: &GenerateParams) -> Result<String> {
            self.seen.lock().unwrap().push((messages.to_vec(), *params));
            self.reply
                .clone()
                .ok_or_else(|| GraError::Provider("scripted failure".into()))
        }
    }

    fn scripted(reply: Option<&str>) -> (GenAiService, Calls) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider {
            reply: reply.map(String::from),
            seen: seen.clone(),
        };
        (GenAiService::with_provider(Box::new(provider), &LlmConfig::default()), seen)
    }

    #[test]
    fn test_explicit_provider_without_key_stays_disabled() {
        if std::env::var("ANTHROPIC_API_KEY").is_ok() {
            return;
        }
        let config = LlmConfig { provider: "anthropic".into(), ..Default::default() };
        let svc = GenAiService::from_config(&config);
        assert!(!svc.is_available());
        assert_eq!(svc.provider_name(), None);
    }

    #[tokio::test]
    async fn test_disabled_returns_none() {
        let svc = GenAiService::disabled();
        assert!(!svc.is_available());
        assert!(svc.generate("hello", 10).await.is_none());
        assert!(svc.chat_response("hello", None, None).await.is_none());
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let (svc, seen) = scripted(Some("plant millets"));
        assert_eq!(svc.provider_name(), Some("scripted"));
        assert_eq!(svc.generate("what to grow?", 42).await.as_deref(), Some("plant millets"));

        let calls = seen.lock().unwrap();
        let (messages, params) = &calls[0];
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].content, "what to grow?");
        assert_eq!(params.max_tokens, 42);
    }

    #[tokio::test]
    async fn test_failure_collapses_to_none() {
        let (svc, _) = scripted(None);
        assert!(svc.complete_rag("prompt").await.is_none());
    }

    #[tokio::test]
    async fn test_chat_response_uses_chat_budget() {
        let (svc, seen) = scripted(Some("ok"));
        svc.chat_response("drought?", Some("Pune"), Some("5")).await;
        let calls = seen.lock().unwrap();
        assert_eq!(calls[0].1.max_tokens, CHAT_MAX_TOKENS);
        assert!(calls[0].0[1].content.contains("Location: Pune, Farm size: 5 acres"));
    }

    #[test]
    fn test_chat_prompt_without_location() {
        let prompt = chat_prompt("hi", None, Some("3"));
        assert!(prompt.contains("User question: hi"));
        assert!(!prompt.contains("farm context"));
    }
}
