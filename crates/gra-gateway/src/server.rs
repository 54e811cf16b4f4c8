//! HTTP server implementation using Axum.

use axum::http::{HeaderValue, Method};
use axum::{
    Router,
    routing::{get, post},
};
use gra_core::GraConfig;
use gra_knowledge::{SimpleRagRetriever, ingest_sample_data};
use gra_providers::GenAiService;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GraConfig>,
    pub start_time: Instant,
    /// The corpus. Every add and retrieve holds this lock.
    pub retriever: Arc<tokio::sync::Mutex<SimpleRagRetriever>>,
    pub prompts: gra_knowledge::PromptManager,
    /// Optional LLM; disabled when no provider is configured.
    pub genai: Arc<GenAiService>,
}

impl AppState {
    /// State with the GenAI service resolved from config and the environment.
    pub fn new(config: GraConfig) -> Self {
        let genai = GenAiService::from_config(&config.llm);
        Self::with_genai(config, genai)
    }

    pub fn with_genai(config: GraConfig, genai: GenAiService) -> Self {
        let retriever = SimpleRagRetriever::new(config.retriever.collection_name.clone());
        Self {
            config: Arc::new(config),
            start_time: Instant::now(),
            retriever: Arc::new(tokio::sync::Mutex::new(retriever)),
            prompts: gra_knowledge::PromptManager::new(),
            genai: Arc::new(genai),
        }
    }
}

fn cors_layer(configured: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    // Restrict origins via config or env, e.g. GRA_CORS_ORIGINS=https://gra.example.org
    let origins_str = match std::env::var("GRA_CORS_ORIGINS") {
        Ok(s) if !s.trim().is_empty() => s,
        _ => configured.to_string(),
    };
    let origins: Vec<HeaderValue> = origins_str
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    let cors = cors_layer(&shared.config.server.cors_origins);

    Router::new()
        .route("/", get(super::routes::root))
        .route("/health", get(super::routes::health_check))
        // RAG demo
        .route("/ingest-sample", post(super::routes::ingest_sample))
        .route("/query", post(super::routes::process_query))
        .route("/collection", get(super::routes::collection_info))
        .route("/templates", get(super::routes::list_templates))
        // Simulation
        .route("/scenarios", get(super::routes::list_scenarios))
        .route("/simulate", post(super::routes::run_simulation))
        // Farm advisory
        .route("/crops", get(super::routes::crop_database))
        .route("/schemes", get(super::routes::government_schemes))
        .route("/ai-chat", post(super::routes::ai_chat))
        .route("/analyze-climate", post(super::routes::analyze_climate))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(config: GraConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let ingest = config.retriever.ingest_sample_on_start;
    let state = AppState::new(config);

    if ingest {
        let mut retriever = state.retriever.lock().await;
        let summary = ingest_sample_data(&mut retriever);
        tracing::info!(
            "📚 Sample corpus loaded: {} document(s)",
            summary.total_documents
        );
    }

    tracing::info!(
        "🧠 GenAI: {}",
        state.genai.provider_name().unwrap_or("disabled (templated responses)")
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🌐 GRA server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_uses_configured_collection() {
        let mut config = GraConfig::default();
        config.retriever.collection_name = "farm_docs".into();
        let state = AppState::with_genai(config, GenAiService::disabled());
        assert_eq!(state.retriever.try_lock().unwrap().info().name, "farm_docs");
        assert!(!state.genai.is_available());
    }
}
