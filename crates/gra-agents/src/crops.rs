//! Crop recommendations: filter the crop table by farm conditions, score what
//! survives and derive rotation, yield and calendar views from the top picks.

use serde::Serialize;

use crate::FarmDetails;
use crate::knowledge_base::{Crop, crops};

/// Number of crops carried into the detailed views.
pub const TOP_CROPS: usize = 5;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

#[derive(Debug, Clone, Serialize)]
pub struct RankedCrop {
    #[serde(flatten)]
    pub crop: &'static Crop,
    pub suitability_score: i32,
    pub recommendation_reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RotationPlan {
    pub kharif_season: Vec<&'static str>,
    pub rabi_season: Vec<&'static str>,
    pub summer_season: Vec<&'static str>,
    pub rotation_benefits: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct YieldEstimate {
    pub yield_kg: f64,
    pub gross_income: f64,
    pub input_cost: f64,
    pub net_income: f64,
    pub profit_margin: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diversification {
    pub primary_crops: Vec<&'static str>,
    pub secondary_crops: Vec<&'static str>,
    pub cash_crops: Vec<&'static str>,
    pub food_security_crops: Vec<&'static str>,
    pub diversification_benefits: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub crop: &'static str,
    pub activity: &'static str,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CropRecommendations {
    pub recommended_crops: Vec<&'static str>,
    pub detailed_recommendations: Vec<RankedCrop>,
    pub crop_rotation_plan: RotationPlan,
    #[serde(serialize_with = "crate::serialize_pairs")]
    pub yield_estimates: Vec<(&'static str, YieldEstimate)>,
    pub diversification_strategy: Diversification,
    #[serde(serialize_with = "crate::serialize_pairs")]
    pub seasonal_calendar: Vec<(&'static str, Vec<CalendarEntry>)>,
}

fn climate_suitable(crop: &Crop, location: &str, risks: &[String]) -> bool {
    crop.climate_zones.is_empty()
        || crop.climate_zones.iter().any(|z| location.contains(z))
        || risks.iter().any(|r| crop.tolerance(r) == Some("high"))
}

fn soil_suitable(crop: &Crop, soil_type: &str) -> bool {
    crop.soil_types.is_empty() || crop.soil_types.iter().any(|s| soil_type.contains(s))
}

fn water_suitable(crop: &Crop, water_source: &str) -> bool {
    if water_source.contains("bore") || water_source.contains("well") {
        matches!(crop.water_requirement, "low" | "medium")
    } else if water_source.contains("river") || water_source.contains("canal") {
        true
    } else {
        // rain-fed
        crop.water_requirement == "low"
    }
}

fn budget_per_acre(farm: &FarmDetails) -> f64 {
    farm.budget / farm.farm_size.max(1.0)
}

/// Suitability on a 0..=100 scale.
pub fn suitability_score(crop: &Crop, farm: &FarmDetails, risks: &[String]) -> i32 {
    let mut score = 50;

    for risk in risks {
        match crop.tolerance(risk) {
            Some("high") => score += 15,
            Some("medium") => score += 5,
            _ => {}
        }
    }

    if crop.market_price_per_kg > 50.0 {
        score += 10;
    } else if crop.market_price_per_kg > 20.0 {
        score += 5;
    }

    if crop.growth_duration_days < 90 {
        score += 10;
    } else if crop.growth_duration_days > 180 {
        score -= 5;
    }

    let per_acre = budget_per_acre(farm);
    if crop.input_cost_per_acre <= per_acre * 0.7 {
        score += 15;
    } else if crop.input_cost_per_acre <= per_acre {
        score += 5;
    } else {
        score -= 10;
    }

    score.clamp(0, 100)
}

fn recommendation_reason(crop: &Crop, farm: &FarmDetails, risks: &[String]) -> String {
    let mut reasons = Vec::new();

    let resilient: Vec<&str> = risks
        .iter()
        .filter(|r| crop.tolerance(r) == Some("high"))
        .map(String::as_str)
        .collect();
    if !resilient.is_empty() {
        reasons.push(format!("Highly resilient to {}", resilient.join(", ")));
    }
    if crop.market_price_per_kg > 50.0 {
        reasons.push("High market value".to_string());
    }
    if crop.growth_duration_days < 90 {
        reasons.push("Quick harvest cycle".to_string());
    }
    if crop.input_cost_per_acre <= budget_per_acre(farm) * 0.7 {
        reasons.push("Budget-friendly".to_string());
    }

    if reasons.is_empty() {
        "Suitable for your farm conditions".to_string()
    } else {
        reasons.join("; ")
    }
}

/// Every crop passing the climate, soil and water filters, best first.
/// Equal scores keep table order.
pub fn rank_crops(farm: &FarmDetails, risks: &[String]) -> Vec<RankedCrop> {
    let location = farm.location.to_lowercase();
    let soil = farm.soil_type.to_lowercase();
    let water = farm.water_source.to_lowercase();

    let mut ranked: Vec<RankedCrop> = crops()
        .iter()
        .filter(|c| climate_suitable(c, &location, risks))
        .filter(|c| soil_suitable(c, &soil))
        .filter(|c| water_suitable(c, &water))
        .map(|crop| RankedCrop {
            crop,
            suitability_score: suitability_score(crop, farm, risks),
            recommendation_reason: recommendation_reason(crop, farm, risks),
        })
        .collect();
    ranked.sort_by(|a, b| b.suitability_score.cmp(&a.suitability_score));
    ranked
}

fn in_season(crop: &Crop, season: &str) -> bool {
    crop.season == season || crop.season == "both"
}

fn rotation_plan(top: &[RankedCrop]) -> RotationPlan {
    let pick = |season: &str, n: usize| {
        names(top.iter().filter(|r| in_season(r.crop, season)).take(n))
    };
    RotationPlan {
        kharif_season: pick("kharif", 2),
        rabi_season: pick("rabi", 2),
        summer_season: pick("summer", 1),
        rotation_benefits: &[
            "Improved soil health",
            "Reduced pest and disease pressure",
            "Better nutrient management",
            "Risk diversification",
        ],
    }
}

pub fn yield_estimate(crop: &Crop, farm_size: f64) -> YieldEstimate {
    let yield_kg = crop.yield_per_acre_kg * farm_size;
    let gross_income = yield_kg * crop.market_price_per_kg;
    let input_cost = crop.input_cost_per_acre * farm_size;
    let net_income = gross_income - input_cost;
    YieldEstimate {
        yield_kg,
        gross_income,
        input_cost,
        net_income,
        profit_margin: if gross_income > 0.0 {
            net_income / gross_income * 100.0
        } else {
            0.0
        },
    }
}

fn names<'a>(it: impl Iterator<Item = &'a RankedCrop>) -> Vec<&'static str> {
    it.map(|r| r.crop.name).collect()
}

fn diversification(ranked: &[RankedCrop]) -> Diversification {
    Diversification {
        primary_crops: names(ranked.iter().take(2)),
        secondary_crops: names(ranked.iter().skip(2).take(2)),
        cash_crops: names(ranked.iter().filter(|r| r.crop.market_price_per_kg > 50.0).take(2)),
        food_security_crops: names(ranked.iter().filter(|r| r.crop.category == "food_grain").take(2)),
        diversification_benefits: &[
            "Reduced market risk",
            "Stable income throughout year",
            "Better resource utilization",
            "Enhanced food security",
        ],
    }
}

fn seasonal_calendar(top: &[RankedCrop]) -> Vec<(&'static str, Vec<CalendarEntry>)> {
    MONTHS
        .iter()
        .map(|&month| {
            let entries = top
                .iter()
                .filter(|r| r.crop.planting_months.iter().any(|m| m.eq_ignore_ascii_case(month)))
                .map(|r| CalendarEntry {
                    crop: r.crop.name,
                    activity: "Planting",
                    duration: format!("{} days", r.crop.growth_duration_days),
                })
                .collect();
            (month, entries)
        })
        .collect()
}

pub fn recommend_crops(farm: &FarmDetails, risks: &[String]) -> CropRecommendations {
    let ranked = rank_crops(farm, risks);
    let top: Vec<RankedCrop> = ranked.iter().take(TOP_CROPS).cloned().collect();

    tracing::debug!(
        suitable = ranked.len(),
        top = ?top.iter().map(|r| r.crop.name).collect::<Vec<_>>(),
        "crops ranked"
    );

    CropRecommendations {
        recommended_crops: names(top.iter()),
        crop_rotation_plan: rotation_plan(&top),
        yield_estimates: top
            .iter()
            .map(|r| (r.crop.name, yield_estimate(r.crop, farm.farm_size)))
            .collect(),
        diversification_strategy: diversification(&ranked),
        seasonal_calendar: seasonal_calendar(&top),
        detailed_recommendations: top,
    }
}
