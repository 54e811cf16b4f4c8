//! Error types shared across GRA crates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("API key missing for provider: {0}")]
    ApiKeyMissing(String),

    #[error("Unknown scenario type: {0}")]
    UnknownScenario(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl GraError {
    /// True for errors caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownScenario(_) | Self::InvalidRequest(_))
    }
}

pub type Result<T> = std::result::Result<T, GraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(GraError::UnknownScenario("x".into()).is_client_error());
        assert!(GraError::InvalidRequest("x".into()).is_client_error());
        assert!(!GraError::Provider("down".into()).is_client_error());
    }

    #[test]
    fn test_display() {
        let e = GraError::UnknownScenario("chaos".into());
        assert_eq!(e.to_string(), "Unknown scenario type: chaos");
    }
}
