//! Provider registry: maps provider names to endpoint configurations.

/// How to attach auth credentials to requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// No authentication required (local servers).
    None,
}

/// Configuration for a single provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider identifier.
    pub name: &'static str,
    /// Base URL for the API.
    pub base_url: &'static str,
    /// Path for chat completions endpoint (appended to base_url).
    pub chat_path: &'static str,
    /// Environment variable names to try for the API key (in order).
    pub env_keys: &'static [&'static str],
    /// How to send auth credentials.
    pub auth_style: AuthStyle,
    /// Model used when the config does not name one.
    pub default_model: &'static str,
}

// Order matters: the first provider with a key in the environment is picked.
static PROVIDERS: &[ProviderConfig] = &[
    ProviderConfig {
        name: "openai",
        base_url: "https://api.openai.com/v1",
        chat_path: "/chat/completions",
        env_keys: &["OPENAI_API_KEY"],
        auth_style: AuthStyle::Bearer,
        default_model: "gpt-3.5-turbo",
    },
    ProviderConfig {
        name: "anthropic",
        base_url: "https://api.anthropic.com/v1",
        chat_path: "/chat/completions",
        env_keys: &["ANTHROPIC_API_KEY"],
        auth_style: AuthStyle::Bearer,
        default_model: "claude-3-haiku-20240307",
    },
    ProviderConfig {
        name: "ollama",
        base_url: "http://localhost:11434/v1",
        chat_path: "/chat/completions",
        env_keys: &[],
        auth_style: AuthStyle::None,
        default_model: "llama3.2",
    },
];

/// Look up a provider config by name.
pub fn get_provider_config(name: &str) -> Option<&'static ProviderConfig> {
    let lookup = match name {
        "claude" => "anthropic",
        "gpt" => "openai",
        other => other,
    };
    PROVIDERS.iter().find(|p| p.name == lookup)
}

/// Providers that can be selected from an environment API key, in priority order.
pub fn env_providers() -> impl Iterator<Item = &'static ProviderConfig> {
    PROVIDERS.iter().filter(|p| !p.env_keys.is_empty())
}

/// List all known provider names.
pub fn all_provider_names() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_aliases() {
        assert_eq!(get_provider_config("openai").unwrap().default_model, "gpt-3.5-turbo");
        assert_eq!(get_provider_config("claude").unwrap().name, "anthropic");
        assert!(get_provider_config("nonexistent").is_none());
    }

    #[test]
    fn test_env_providers_priority() {
        let names: Vec<_> = env_providers().map(|p| p.name).collect();
        assert_eq!(names, vec!["openai", "anthropic"]);
        assert_eq!(all_provider_names(), vec!["openai", "anthropic", "ollama"]);
    }
}
