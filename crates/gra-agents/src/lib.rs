//! # GRA Agents
//!
//! Farm advisors built as pure functions over constant tables.
//!
//! ## Pipeline
//! ```text
//! FarmDetails + concerns ─▶ climate::analyze_risks ─▶ risks
//!                            crops::recommend_crops(farm, risks)
//!                            market::analyze_market_potential(crops, location)
//! FarmDetails + goals ─────▶ schemes::find_relevant_schemes
//!                            plan::build_adaptation_plan ties them together
//! ```
//!
//! `chat` answers free-form questions with canned replies and `scenarios`
//! produces simulated workload summaries.

pub mod chat;
pub mod climate;
pub mod crops;
pub mod knowledge_base;
pub mod market;
pub mod plan;
pub mod scenarios;
pub mod schemes;

use serde::{Deserialize, Serialize, Serializer};

pub use plan::{AdaptationPlan, AdaptationRequest, build_adaptation_plan};
pub use scenarios::{available_scenarios, run_scenario};

/// What the farmer tells us about the farm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmDetails {
    pub location: String,
    /// Acres.
    pub farm_size: f64,
    pub soil_type: String,
    pub water_source: String,
    #[serde(default)]
    pub current_crops: Vec<String>,
    /// Rupees.
    pub budget: f64,
    #[serde(default)]
    pub experience_level: String,
}

/// Serialize ordered `(key, value)` pairs as a JSON object.
pub(crate) fn serialize_pairs<S, K, V>(pairs: &[(K, V)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    K: Serialize,
    V: Serialize,
{
    serializer.collect_map(pairs.iter().map(|(k, v)| (k, v)))
}
