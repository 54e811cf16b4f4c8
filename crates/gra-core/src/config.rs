//! GRA configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GraError, Result};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub retriever: RetrieverConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl GraConfig {
    /// Load config from the default path (~/.gra/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GraError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| GraError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| GraError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the GRA home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gra")
    }

    /// Expand `~` in a user-supplied path.
    pub fn expand_path(p: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(p).to_string())
    }

    /// Apply `GRA_HOST`, `GRA_PORT` and `PORT` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("GRA_HOST") {
            self.server.host = host;
        }
        let port = std::env::var("GRA_PORT").or_else(|_| std::env::var("PORT"));
        if let Ok(port) = port {
            match port.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(e) => tracing::warn!("⚠️ Ignoring invalid port '{port}': {e}"),
            }
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Comma-separated allowed CORS origins; empty allows any origin.
    #[serde(default)]
    pub cors_origins: String,
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: String::new(),
        }
    }
}

/// Document retriever configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieverConfig {
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Load the sample corpus at startup.
    #[serde(default)]
    pub ingest_sample_on_start: bool,
}

fn default_collection_name() -> String { "gra_knowledge".into() }
fn default_top_n() -> usize { 5 }

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            collection_name: default_collection_name(),
            top_n: default_top_n(),
            ingest_sample_on_start: false,
        }
    }
}

/// Optional external LLM configuration. Every field may be left empty;
/// the provider is then picked from whichever API key is in the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 { 0.7 }
fn default_max_tokens() -> u32 { 2000 }
fn default_timeout_secs() -> u64 { 30 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: String::new(),
            model: String::new(),
            api_key: String::new(),
            endpoint: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
