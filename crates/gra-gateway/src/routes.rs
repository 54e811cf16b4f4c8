//! API route handlers for the gateway.

use axum::{Json, extract::State};
use gra_agents::{AdaptationRequest, chat, knowledge_base, plan, scenarios};
use gra_core::error::GraError;
use gra_knowledge::{Template, ingest_sample_data};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::extract::{ApiError, ApiJson};
use super::server::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    /// Extra context appended to the prompt.
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    pub scenario_type: String,
    #[serde(default)]
    pub parameters: Value,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<Value>,
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "GRA Prototype API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let documents = state.retriever.lock().await.count();
    Json(json!({
        "status": "healthy",
        "retriever": "SimpleRAG",
        "documents": documents,
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "genai": state.genai.is_available(),
    }))
}

pub async fn ingest_sample(State(state): State<Arc<AppState>>) -> Json<Value> {
    let summary = ingest_sample_data(&mut *state.retriever.lock().await);
    tracing::info!(
        "📚 Ingested {} sample document(s), {} total",
        summary.ingested_count,
        summary.total_documents
    );
    Json(json!({
        "message": "Sample data ingested successfully",
        "result": summary,
        "ingested_count": summary.ingested_count,
        "total_documents": summary.total_documents,
    }))
}

/// Retrieve context for a query and answer it, through the LLM when one is
/// configured and with the template's canned reply otherwise.
pub async fn process_query(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<QueryRequest>,
) -> Json<Value> {
    let template = body
        .template
        .as_deref()
        .map_or(Template::Default, Template::from_name);
    let top_n = state.config.retriever.top_n;
    let context = state.retriever.lock().await.retrieve(&body.query, top_n);
    tracing::debug!(
        query = %body.query,
        hits = context.len(),
        template = template.name(),
        "query"
    );

    let additional = body.context.as_deref();
    let mut response = None;
    if state.genai.is_available() {
        let prompt = state
            .prompts
            .build_prompt(template, &body.query, &context, additional);
        response = state.genai.complete_rag(&prompt).await;
    }
    let response = response.unwrap_or_else(|| {
        state
            .prompts
            .generate_response(template, &body.query, &context, additional)
    });

    Json(json!({"response": response, "context": context}))
}

pub async fn collection_info(State(state): State<Arc<AppState>>) -> Json<Value> {
    let info = state.retriever.lock().await.info();
    Json(json!(info))
}

pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({"templates": state.prompts.available_templates()}))
}

pub async fn list_scenarios() -> Json<Value> {
    Json(json!({"scenarios": scenarios::available_scenarios()}))
}

pub async fn run_simulation(
    ApiJson(body): ApiJson<SimulationRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = scenarios::run_scenario(&body.scenario_type, &body.parameters)?;
    Ok(Json(json!({"result": result})))
}

pub async fn crop_database() -> Json<Value> {
    Json(json!({"success": true, "crops": knowledge_base::crops()}))
}

pub async fn government_schemes() -> Json<Value> {
    Json(json!({"success": true, "schemes": knowledge_base::schemes()}))
}

/// String form of a context field; numbers are accepted for `farm_size`.
fn context_str(context: Option<&Value>, key: &str) -> Option<String> {
    match context?.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Farming assistant chat. Falls back to keyword replies when the LLM is
/// unavailable or fails.
pub async fn ai_chat(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<ChatRequest>,
) -> Json<Value> {
    let location = context_str(body.context.as_ref(), "location");
    let farm_size = context_str(body.context.as_ref(), "farm_size");

    let generated = state
        .genai
        .chat_response(&body.message, location.as_deref(), farm_size.as_deref())
        .await;
    let ai_generated = generated.is_some();
    let response = generated.unwrap_or_else(|| {
        chat::reply(&body.message, location.as_deref(), farm_size.as_deref())
    });

    Json(json!({
        "success": true,
        "response": response,
        "timestamp": chrono::Local::now().to_rfc3339(),
        "ai_generated": ai_generated,
    }))
}

/// Build a complete climate adaptation plan for a farm.
pub async fn analyze_climate(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<AdaptationRequest>,
) -> Result<Json<Value>, ApiError> {
    let farm = &request.farm_details;
    if !(farm.farm_size.is_finite() && farm.farm_size >= 0.0) {
        let msg = "farm_size must be a non-negative number";
        return Err(GraError::InvalidRequest(msg.into()).into());
    }
    if !(farm.budget.is_finite() && farm.budget >= 0.0) {
        let msg = "budget must be a non-negative number";
        return Err(GraError::InvalidRequest(msg.into()).into());
    }

    let adaptation_plan = plan::build_adaptation_plan(&request);
    let ai_insights = if state.genai.is_available() {
        let prompt = plan::analysis_prompt(&adaptation_plan, farm);
        state.genai.complete_rag(&prompt).await
    } else {
        None
    };

    let mut body = json!({
        "success": true,
        "adaptation_plan": adaptation_plan,
    });
    if let Some(insights) = ai_insights {
        body["ai_insights"] = Value::String(insights);
    }
    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::build_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use gra_core::GraConfig;
    use gra_providers::{ChatMessage, GenAiService, GenerateParams, Provider};
    use tower::ServiceExt;

    fn app_state() -> AppState {
        AppState::with_genai(GraConfig::default(), GenAiService::disabled())
    }

    fn test_state() -> State<Arc<AppState>> {
        State(Arc::new(app_state()))
    }

    struct FixedProvider(&'static str);

    #[async_trait]
    impl Provider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn chat(
            &self,
            _messages: &[ChatMessage],
            _params: &GenerateParams,
        ) -> gra_core::error::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn llm_state(reply: &'static str) -> State<Arc<AppState>> {
        let config = GraConfig::default();
        let genai = GenAiService::with_provider(Box::new(FixedProvider(reply)), &config.llm);
        State(Arc::new(AppState::with_genai(config, genai)))
    }

    fn farm_request() -> AdaptationRequest {
        serde_json::from_value(json!({
            "farm_details": {
                "location": "Nagpur, Maharashtra",
                "farm_size": 4,
                "soil_type": "black",
                "water_source": "canal",
                "current_crops": ["cotton"],
                "budget": 150000,
                "experience_level": "experienced"
            },
            "climate_concerns": ["heat_waves"],
            "adaptation_goals": ["irrigation", "insurance"]
        }))
        .unwrap()
    }

    // ---- Health & RAG ----

    #[tokio::test]
    async fn test_health_check() {
        let json = health_check(test_state()).await.0;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["retriever"], "SimpleRAG");
        assert_eq!(json["documents"], 0);
        assert_eq!(json["genai"], false);
    }

    #[tokio::test]
    async fn test_ingest_then_query() {
        let state = test_state();
        let json = ingest_sample(State(state.0.clone())).await.0;
        assert_eq!(json["ingested_count"], 8);
        assert_eq!(json["result"]["total_documents"], 8);

        let body = QueryRequest {
            query: "RAG systems using vector similarity search".into(),
            context: None,
            template: Some("technical".into()),
        };
        let json = process_query(State(state.0.clone()), ApiJson(body)).await.0;
        let context = json["context"].as_array().unwrap();
        assert_eq!(context.len(), 5);
        assert_eq!(context[0]["metadata"]["topic"], "rag_explanation");
        assert!(!json["response"].as_str().unwrap().is_empty());

        let info = collection_info(state).await.0;
        assert_eq!(info["count"], 8);
        assert_eq!(info["name"], "gra_knowledge");
    }

    #[tokio::test]
    async fn test_query_empty_corpus() {
        let body = QueryRequest { query: "anything".into(), context: None, template: None };
        let json = process_query(test_state(), ApiJson(body)).await.0;
        assert!(json["context"].as_array().unwrap().is_empty());
        assert!(json["response"].is_string());
    }

    #[tokio::test]
    async fn test_query_uses_llm_when_available() {
        let body = QueryRequest { query: "soil".into(), context: None, template: None };
        let json = process_query(llm_state("from the model"), ApiJson(body)).await.0;
        assert_eq!(json["response"], "from the model");
    }

    #[tokio::test]
    async fn test_templates_and_scenarios() {
        let json = list_templates(test_state()).await.0;
        assert_eq!(json["templates"].as_array().unwrap().len(), 5);
        let json = list_scenarios().await.0;
        assert_eq!(json["scenarios"][0], "basic_query");
    }

    // ---- Simulation ----

    #[tokio::test]
    async fn test_simulate() {
        let body = SimulationRequest {
            scenario_type: "stress_test".into(),
            parameters: json!({"concurrent_users": 2, "queries_per_user": 50}),
        };
        let json = run_simulation(ApiJson(body)).await.unwrap().0;
        assert_eq!(json["result"]["total_queries"], 100);
    }

    #[tokio::test]
    async fn test_simulate_unknown() {
        let body = SimulationRequest { scenario_type: "nope".into(), parameters: Value::Null };
        let err = run_simulation(ApiJson(body)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Unknown scenario type: nope");
    }

    // ---- Farm advisory ----

    #[tokio::test]
    async fn test_crops_and_schemes() {
        let json = crop_database().await.0;
        assert_eq!(json["success"], true);
        assert_eq!(json["crops"].as_array().unwrap().len(), 10);
        let json = government_schemes().await.0;
        assert_eq!(json["schemes"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_ai_chat_fallback() {
        let body = ChatRequest {
            message: "Which crops should I plant?".into(),
            context: Some(json!({"location": "Nagpur", "farm_size": 3})),
        };
        let json = ai_chat(test_state(), ApiJson(body)).await.0;
        assert_eq!(json["success"], true);
        assert_eq!(json["ai_generated"], false);
        assert!(json["response"].as_str().unwrap().contains("for Nagpur"));
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_ai_chat_with_llm() {
        let body = ChatRequest { message: "hello".into(), context: None };
        let json = ai_chat(llm_state("namaste"), ApiJson(body)).await.0;
        assert_eq!(json["ai_generated"], true);
        assert_eq!(json["response"], "namaste");
    }

    #[test]
    fn test_context_str() {
        let ctx = json!({"location": "Pune", "farm_size": 2.5, "empty": ""});
        assert_eq!(context_str(Some(&ctx), "location").as_deref(), Some("Pune"));
        assert_eq!(context_str(Some(&ctx), "farm_size").as_deref(), Some("2.5"));
        assert_eq!(context_str(Some(&ctx), "empty"), None);
        assert_eq!(context_str(None, "location"), None);
    }

    #[tokio::test]
    async fn test_analyze_climate() {
        let json = analyze_climate(test_state(), ApiJson(farm_request())).await.unwrap().0;
        assert_eq!(json["success"], true);
        let plan = &json["adaptation_plan"];
        assert!(plan["farm_id"].as_str().unwrap().starts_with("farm_"));
        assert_eq!(plan["climate_analysis"]["risks"][0], "drought");
        assert!(plan["crop_recommendations"]["recommended_crops"].is_array());
        assert!(json.get("ai_insights").is_none());
    }

    #[tokio::test]
    async fn test_analyze_climate_with_llm_insights() {
        let json = analyze_climate(llm_state("rotate crops"), ApiJson(farm_request()))
            .await
            .unwrap()
            .0;
        assert_eq!(json["ai_insights"], "rotate crops");
    }

    #[tokio::test]
    async fn test_analyze_climate_rejects_negative_size() {
        let mut request = farm_request();
        request.farm_details.farm_size = -1.0;
        let err = analyze_climate(test_state(), ApiJson(request)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    // ---- Extraction through the router ----

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = build_router(app_state());
        let req = Request::post("/query")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Invalid JSON data");
    }
}
