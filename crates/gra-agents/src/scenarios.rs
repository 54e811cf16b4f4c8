//! Simulated RAG workload scenarios.
//!
//! Each scenario produces a randomized performance summary. Nothing is
//! actually executed and nothing sleeps.

use gra_core::error::{GraError, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};

pub const SCENARIOS: [&str; 4] = [
    "basic_query",
    "stress_test",
    "context_switching",
    "knowledge_gap",
];

/// Upper bound for any simulated query or switch count.
pub const MAX_ITERATIONS: u64 = 10_000;

const DEFAULT_TOPICS: [&str; 4] = ["technology", "science", "business", "health"];

pub fn available_scenarios() -> Vec<&'static str> {
    SCENARIOS.to_vec()
}

/// Run scenario `kind` with a thread-local RNG.
pub fn run_scenario(kind: &str, params: &Value) -> Result<Value> {
    run_scenario_with(kind, params, &mut rand::thread_rng())
}

pub fn run_scenario_with<R: Rng>(kind: &str, params: &Value, rng: &mut R) -> Result<Value> {
    tracing::debug!(kind, %params, "running scenario");
    match kind {
        "basic_query" => basic_query(params, rng),
        "stress_test" => stress_test(params, rng),
        "context_switching" => context_switching(params, rng),
        "knowledge_gap" => knowledge_gap(params, rng),
        other => Err(GraError::UnknownScenario(other.to_string())),
    }
}

/// Read a positive count parameter, falling back to `default` when absent.
fn count(params: &Value, key: &str, default: u64) -> Result<u64> {
    let n = match params.get(key) {
        None | Some(Value::Null) => default,
        Some(v) => v.as_u64().ok_or_else(|| {
            GraError::InvalidRequest(format!("{key} must be a non-negative integer"))
        })?,
    };
    if n == 0 || n > MAX_ITERATIONS {
        return Err(GraError::InvalidRequest(format!(
            "{key} must be between 1 and {MAX_ITERATIONS}"
        )));
    }
    Ok(n)
}

fn float(params: &Value, key: &str, default: f64) -> f64 {
    params.get(key).and_then(Value::as_f64).unwrap_or(default)
}

fn basic_query<R: Rng>(params: &Value, rng: &mut R) -> Result<Value> {
    let queries = count(params, "query_count", 10)?;
    let delay = float(params, "delay", 0.1).max(0.0);

    let mut total_time = 0.0;
    let mut successes = 0u64;
    let mut tokens = 0u64;
    for _ in 0..queries {
        total_time += delay + rng.gen_range(0.0..0.05);
        if rng.r#gen::<f64>() > 0.05 {
            successes += 1;
        }
        tokens += rng.gen_range(50..=200);
    }

    Ok(json!({
        "scenario": "basic_query",
        "total_queries": queries,
        "total_time": total_time,
        "average_response_time": total_time / queries as f64,
        "success_rate": successes as f64 / queries as f64,
        "total_tokens": tokens,
    }))
}

fn stress_test<R: Rng>(params: &Value, rng: &mut R) -> Result<Value> {
    let users = count(params, "concurrent_users", 5)?;
    let per_user = count(params, "queries_per_user", 20)?;
    let total = users * per_user;
    let failed = (total as f64 * rng.gen_range(0.02..0.08)) as u64;

    Ok(json!({
        "scenario": "stress_test",
        "concurrent_users": users,
        "queries_per_user": per_user,
        "total_queries": total,
        "failed_queries": failed,
        "success_rate": (total - failed) as f64 / total as f64,
        "average_response_time": rng.gen_range(0.5..2.0),
        "peak_memory_usage": format!("{}MB", rng.gen_range(200..=500)),
        "cpu_utilization": format!("{}%", rng.gen_range(60..=95)),
    }))
}

fn context_switching<R: Rng>(params: &Value, rng: &mut R) -> Result<Value> {
    let switches = count(params, "context_switches", 5)?;
    let topics: Vec<String> = match params.get("topics").and_then(Value::as_array) {
        Some(list) if !list.is_empty() => list
            .iter()
            .map(|t| t.as_str().map(String::from).unwrap_or_else(|| t.to_string()))
            .collect(),
        _ => DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
    };

    let mut current: Option<&String> = None;
    let mut seen: Vec<&String> = Vec::new();
    let mut changes = 0u64;
    let mut total_time = 0.0;
    let mut total_accuracy = 0.0;

    for _ in 0..switches {
        let Some(next) = topics.choose(rng) else { break };
        let mut response_time = rng.gen_range(0.1..0.3);
        if current != Some(next) {
            changes += 1;
            response_time += rng.gen_range(0.05..0.15);
        }
        total_time += response_time;
        total_accuracy += rng.gen_range(0.8..0.98);
        if !seen.contains(&next) {
            seen.push(next);
        }
        current = Some(next);
    }

    Ok(json!({
        "scenario": "context_switching",
        "total_switches": switches,
        "unique_contexts": seen.len(),
        "average_response_time": total_time / switches as f64,
        "average_accuracy": total_accuracy / switches as f64,
        "context_changes": changes,
    }))
}

fn knowledge_gap<R: Rng>(params: &Value, rng: &mut R) -> Result<Value> {
    let queries = count(params, "query_count", 15)?;
    let coverage = float(params, "knowledge_coverage", 0.7).clamp(0.0, 1.0);

    let mut with_knowledge = 0u64;
    let mut fallbacks = 0u64;
    let mut confidence = 0.0;
    let mut quality = 0.0;

    for _ in 0..queries {
        if rng.r#gen::<f64>() < coverage {
            with_knowledge += 1;
            confidence += rng.gen_range(0.8..0.95);
            quality += rng.gen_range(0.85..0.98);
        } else {
            confidence += rng.gen_range(0.3..0.6);
            quality += rng.gen_range(0.4..0.7);
            if rng.r#gen::<f64>() > 0.3 {
                fallbacks += 1;
            }
        }
    }

    Ok(json!({
        "scenario": "knowledge_gap",
        "total_queries": queries,
        "knowledge_coverage": coverage,
        "queries_with_knowledge": with_knowledge,
        "average_confidence": confidence / queries as f64,
        "average_quality": quality / queries as f64,
        "fallback_usage": fallbacks,
    }))
}
