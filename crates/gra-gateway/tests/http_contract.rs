use gra_core::GraConfig;
use gra_gateway::{AppState, build_router};
use gra_providers::GenAiService;
use serde_json::{Value, json};

async fn spawn_server() -> (String, tokio::task::JoinHandle<()>) {
    let app = build_router(AppState::with_genai(
        GraConfig::default(),
        GenAiService::disabled(),
    ));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });
    (format!("http://{}", addr), handle)
}

#[tokio::test]
async fn health_reports_document_count() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("health response")
        .json()
        .await
        .expect("health json");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["documents"], 0);

    client
        .post(format!("{}/ingest-sample", base))
        .send()
        .await
        .expect("ingest response");

    let body: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("health response")
        .json()
        .await
        .expect("health json");
    assert_eq!(body["documents"], 8);

    handle.abort();
}

#[tokio::test]
async fn query_returns_ranked_context() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let empty: Value = client
        .post(format!("{}/query", base))
        .json(&json!({"query": "anything"}))
        .send()
        .await
        .expect("query response")
        .json()
        .await
        .expect("query json");
    assert_eq!(empty["context"], json!([]));

    client
        .post(format!("{}/ingest-sample", base))
        .send()
        .await
        .expect("ingest response");

    let response = client
        .post(format!("{}/query", base))
        .json(&json!({"query": "deployment platforms like railway", "template": "summarization"}))
        .send()
        .await
        .expect("query response");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("query json");

    let context = body["context"].as_array().expect("context array");
    assert_eq!(context.len(), 5);
    assert_eq!(context[0]["metadata"]["topic"], "deployment");
    let distances: Vec<f64> = context
        .iter()
        .map(|c| c["distance"].as_f64().expect("distance"))
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));

    handle.abort();
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/simulate", base))
        .header("content-type", "application/json")
        .body("{\"scenario_type\": ")
        .send()
        .await
        .expect("simulate response");
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error json");
    assert_eq!(body["error"], "Invalid JSON data");

    handle.abort();
}

#[tokio::test]
async fn simulate_unknown_scenario_is_client_error() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/simulate", base))
        .json(&json!({"scenario_type": "meteor_strike", "parameters": {}}))
        .send()
        .await
        .expect("simulate response");
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error json");
    assert_eq!(body["detail"], "Unknown scenario type: meteor_strike");

    let response = client
        .post(format!("{}/simulate", base))
        .json(&json!({"scenario_type": "knowledge_gap", "parameters": {"query_count": 3}}))
        .send()
        .await
        .expect("simulate response");
    let body: Value = response.json().await.expect("simulate json");
    assert_eq!(body["result"]["total_queries"], 3);

    handle.abort();
}

#[tokio::test]
async fn analyze_climate_builds_plan() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/analyze-climate", base))
        .json(&json!({
            "farm_details": {
                "location": "Alappuzha, Kerala",
                "farm_size": 2.5,
                "soil_type": "clay loamy",
                "water_source": "river",
                "current_crops": ["rice"],
                "budget": 120000,
                "experience_level": "beginner"
            },
            "climate_concerns": ["flooding"],
            "adaptation_goals": ["insurance", "soil health"]
        }))
        .send()
        .await
        .expect("analyze response");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("analyze json");

    let plan = &body["adaptation_plan"];
    assert_eq!(body["success"], true);
    assert_eq!(plan["climate_analysis"]["risks"][0], "flooding");
    assert_eq!(plan["climate_analysis"]["urgency_level"], "Medium");
    assert_eq!(plan["crop_recommendations"]["recommended_crops"][0], "Rice");
    let rice = &plan["market_analysis"]["crop_market_analysis"]["Rice"];
    assert_eq!(rice["price_trend"], "increasing");
    assert_eq!(rice["market_accessibility"]["accessibility_score"], 5);
    assert!(plan["government_schemes"]["recommended_schemes"].as_array().is_some());
    assert_eq!(plan["implementation_timeline"].as_array().map(Vec::len), Some(3));

    handle.abort();
}

#[tokio::test]
async fn chat_falls_back_to_canned_reply() {
    let (base, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{}/ai-chat", base))
        .json(&json!({"message": "Tell me about drip irrigation"}))
        .send()
        .await
        .expect("chat response")
        .json()
        .await
        .expect("chat json");
    assert_eq!(body["ai_generated"], false);
    assert!(body["response"].as_str().expect("response").contains("Water Management"));

    handle.abort();
}
