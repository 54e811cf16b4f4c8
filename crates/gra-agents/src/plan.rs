//! Full adaptation plan: climate → crops → market → schemes, plus timeline,
//! costs and expected benefits.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::FarmDetails;
use crate::climate::{ClimateAnalysis, analyze_risks};
use crate::crops::{CropRecommendations, recommend_crops};
use crate::market::{MarketAnalysis, analyze_market_potential};
use crate::schemes::{SchemeRecommendations, find_relevant_schemes};

/// Cost per recommended crop.
const COST_PER_CROP: f64 = 15_000.0;
const SUBSIDY_SHARE: f64 = 0.4;

#[derive(Debug, Clone, Deserialize)]
pub struct AdaptationRequest {
    pub farm_details: FarmDetails,
    #[serde(default)]
    pub climate_concerns: Vec<String>,
    #[serde(default)]
    pub adaptation_goals: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Phase {
    pub phase: &'static str,
    pub actions: &'static [&'static str],
}

static TIMELINE: [Phase; 3] = [
    Phase {
        phase: "Immediate (0-3 months)",
        actions: &[
            "Soil testing and preparation",
            "Water source assessment",
            "Seed procurement for recommended crops",
        ],
    },
    Phase {
        phase: "Short-term (3-12 months)",
        actions: &[
            "Plant climate-resilient crops",
            "Install water conservation systems",
            "Apply for government schemes",
        ],
    },
    Phase {
        phase: "Long-term (1-3 years)",
        actions: &[
            "Establish perennial crops",
            "Build climate-resilient infrastructure",
            "Diversify income sources",
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub seeds_and_inputs: f64,
    pub infrastructure: f64,
    pub training_and_support: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostEstimate {
    pub total_estimated_cost: f64,
    pub government_subsidy: f64,
    pub farmer_contribution: f64,
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpectedBenefits {
    pub increased_yield: &'static str,
    pub reduced_risk: &'static str,
    pub income_improvement: &'static str,
    pub sustainability_score: &'static str,
    pub climate_resilience: &'static str,
}

const BENEFITS: ExpectedBenefits = ExpectedBenefits {
    increased_yield: "25-40%",
    reduced_risk: "60%",
    income_improvement: "30-50%",
    sustainability_score: "85%",
    climate_resilience: "High",
};

#[derive(Debug, Clone, Serialize)]
pub struct AdaptationPlan {
    pub farm_id: String,
    pub climate_analysis: ClimateAnalysis,
    pub crop_recommendations: CropRecommendations,
    pub market_analysis: MarketAnalysis,
    pub government_schemes: SchemeRecommendations,
    pub implementation_timeline: &'static [Phase],
    pub estimated_costs: CostEstimate,
    pub expected_benefits: ExpectedBenefits,
}

pub fn estimate_costs(crop_count: usize) -> CostEstimate {
    let base = crop_count as f64 * COST_PER_CROP;
    CostEstimate {
        total_estimated_cost: base,
        government_subsidy: base * SUBSIDY_SHARE,
        farmer_contribution: base * (1.0 - SUBSIDY_SHARE),
        breakdown: CostBreakdown {
            seeds_and_inputs: base * 0.3,
            infrastructure: base * 0.5,
            training_and_support: base * 0.2,
        },
    }
}

pub fn build_adaptation_plan(request: &AdaptationRequest) -> AdaptationPlan {
    let farm = &request.farm_details;
    let climate_analysis = analyze_risks(&farm.location, &request.climate_concerns);
    let crop_recommendations = recommend_crops(farm, &climate_analysis.risks);
    let market_analysis =
        analyze_market_potential(&crop_recommendations.recommended_crops, &farm.location);
    let government_schemes = find_relevant_schemes(farm, &request.adaptation_goals);
    let estimated_costs = estimate_costs(crop_recommendations.recommended_crops.len());

    let farm_id = format!("farm_{}", Local::now().format("%Y%m%d_%H%M%S"));
    tracing::info!(
        farm_id = %farm_id,
        location = %farm.location,
        crops = crop_recommendations.recommended_crops.len(),
        schemes = government_schemes.recommended_schemes.len(),
        "adaptation plan built"
    );

    AdaptationPlan {
        farm_id,
        climate_analysis,
        crop_recommendations,
        market_analysis,
        government_schemes,
        implementation_timeline: &TIMELINE,
        estimated_costs,
        expected_benefits: BENEFITS,
    }
}

/// Prompt asking an LLM to comment on a finished plan.
pub fn analysis_prompt(plan: &AdaptationPlan, farm: &FarmDetails) -> String {
    format!(
        "Analyze this farm adaptation plan and give three short, practical insights.\n\n\
         Farm: {} acres in {}, {} soil, water from {}, budget ₹{:.0}.\n\
         Climate risks: {} (urgency {}).\n\
         Recommended crops: {}.\n\
         Market: {}.\n\
         Schemes: {}.",
        farm.farm_size,
        farm.location,
        farm.soil_type,
        farm.water_source,
        farm.budget,
        plan.climate_analysis.risks.join(", "),
        plan.climate_analysis.urgency_level,
        plan.crop_recommendations.recommended_crops.join(", "),
        plan.market_analysis.market_insights.join("; "),
        plan.government_schemes
            .recommended_schemes
            .iter()
            .map(|s| s.scheme.name)
            .collect::<Vec<_>>()
            .join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AdaptationRequest {
        serde_json::from_value(serde_json::json!({
            "farm_details": {
                "location": "Pune, Maharashtra",
                "farm_size": 5.0,
                "soil_type": "black",
                "water_source": "borewell",
                "current_crops": ["cotton"],
                "budget": 200000.0,
                "experience_level": "intermediate"
            },
            "climate_concerns": ["drought"],
            "adaptation_goals": ["water conservation"]
        }))
        .unwrap()
    }

    #[test]
    fn test_costs() {
        let c = estimate_costs(4);
        assert_eq!(c.total_estimated_cost, 60_000.0);
        assert_eq!(c.government_subsidy, 24_000.0);
        assert_eq!(c.farmer_contribution, 36_000.0);
        assert_eq!(c.breakdown.infrastructure, 30_000.0);
        assert_eq!(estimate_costs(0).total_estimated_cost, 0.0);
    }

    #[test]
    fn test_plan_pipeline() {
        let req = request();
        let plan = build_adaptation_plan(&req);
        assert!(plan.farm_id.starts_with("farm_"));
        assert_eq!(plan.farm_id.len(), "farm_20240101_120000".len());
        assert_eq!(plan.climate_analysis.risks[0], "drought");
        assert!(!plan.crop_recommendations.recommended_crops.is_empty());
        assert!(!plan.government_schemes.recommended_schemes.is_empty());
        assert_eq!(
            plan.estimated_costs,
            estimate_costs(plan.crop_recommendations.recommended_crops.len())
        );
        assert_eq!(plan.implementation_timeline.len(), 3);

        let prompt = analysis_prompt(&plan, &req.farm_details);
        assert!(prompt.contains("5 acres in Pune, Maharashtra"));
        assert!(prompt.contains("Cotton"));
    }

    #[test]
    fn test_plan_serializes() {
        let v = serde_json::to_value(build_adaptation_plan(&request())).unwrap();
        assert_eq!(v["expected_benefits"]["climate_resilience"], "High");
        let cotton = &v["market_analysis"]["crop_market_analysis"]["Cotton"];
        assert_eq!(cotton["current_price"], 55.0);
        assert_eq!(cotton["market_accessibility"]["nearest_market_km"], 15);
        assert_eq!(v["implementation_timeline"][0]["phase"], "Immediate (0-3 months)");
        let totals = &v["government_schemes"]["total_potential_subsidy"];
        assert!(totals["total_subsidy_amount"].is_number());
    }

    #[test]
    fn test_missing_farm_field_is_rejected() {
        let res: Result<AdaptationRequest, _> =
            serde_json::from_value(serde_json::json!({"farm_details": {"location": "x"}}));
        assert!(res.is_err());
    }
}
