//! Market potential for a set of crops: per-crop price profiles, access to
//! markets from the farm's location, and the selling strategies that follow.

use serde::Serialize;

use crate::knowledge_base::market_data;

/// Price above which a crop counts as high value (₹/kg).
const HIGH_VALUE_PRICE: f64 = 40.0;

/// Fewer distinct crops than this is flagged as a concentration risk.
const MIN_DIVERSIFIED: usize = 3;

const URBAN_MARKETS: [&str; 7] = [
    "mumbai",
    "delhi",
    "bangalore",
    "chennai",
    "kolkata",
    "hyderabad",
    "pune",
];

/// Crops that are worth processing before sale.
const VALUE_ADDITION_CROPS: [&str; 3] = ["rice", "wheat", "maize"];

#[derive(Debug, Clone, Serialize)]
pub struct Seasonality {
    pub peak_months: &'static [&'static str],
    pub low_months: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketProfile {
    pub current_price: f64,
    pub price_trend: &'static str,
    pub demand_level: &'static str,
    #[serde(rename = "price_volatility")]
    pub volatility: &'static str,
    pub seasonal_patterns: Seasonality,
    pub export_potential: &'static str,
    pub local_demand: &'static str,
}

static DEFAULT_PROFILE: MarketProfile = MarketProfile {
    current_price: 25.0,
    price_trend: "stable",
    demand_level: "medium",
    volatility: "medium",
    seasonal_patterns: Seasonality {
        peak_months: &["march", "april"],
        low_months: &["july", "august"],
    },
    export_potential: "medium",
    local_demand: "high",
};

static PROFILES: &[(&str, MarketProfile)] = &[
    (
        "rice",
        MarketProfile {
            current_price: 22.0,
            price_trend: "increasing",
            demand_level: "high",
            volatility: "low",
            seasonal_patterns: Seasonality {
                peak_months: &["october", "november"],
                low_months: &["june", "july"],
            },
            export_potential: "high",
            local_demand: "very_high",
        },
    ),
    (
        "wheat",
        MarketProfile {
            current_price: 20.0,
            price_trend: "stable",
            demand_level: "high",
            volatility: "low",
            seasonal_patterns: Seasonality {
                peak_months: &["april", "may"],
                low_months: &["december", "january"],
            },
            export_potential: "medium",
            local_demand: "very_high",
        },
    ),
    (
        "cotton",
        MarketProfile {
            current_price: 55.0,
            price_trend: "increasing",
            demand_level: "high",
            volatility: "high",
            seasonal_patterns: Seasonality {
                peak_months: &["december", "january"],
                low_months: &["june", "july"],
            },
            export_potential: "very_high",
            local_demand: "medium",
        },
    ),
    (
        "sugarcane",
        MarketProfile {
            current_price: 3.0,
            price_trend: "stable",
            demand_level: "high",
            volatility: "low",
            seasonal_patterns: Seasonality {
                peak_months: &["february", "march"],
                low_months: &["august", "september"],
            },
            export_potential: "low",
            local_demand: "very_high",
        },
    ),
    (
        "soybean",
        MarketProfile {
            current_price: 45.0,
            price_trend: "increasing",
            demand_level: "high",
            volatility: "medium",
            seasonal_patterns: Seasonality {
                peak_months: &["november", "december"],
                low_months: &["july", "august"],
            },
            export_potential: "high",
            local_demand: "high",
        },
    ),
    (
        "maize",
        MarketProfile {
            current_price: 18.0,
            price_trend: "stable",
            demand_level: "medium",
            volatility: "medium",
            seasonal_patterns: Seasonality {
                peak_months: &["january", "february"],
                low_months: &["september", "october"],
            },
            export_potential: "medium",
            local_demand: "high",
        },
    ),
    (
        "tomato",
        MarketProfile {
            current_price: 35.0,
            price_trend: "volatile",
            demand_level: "high",
            volatility: "very_high",
            seasonal_patterns: Seasonality {
                peak_months: &["december", "january"],
                low_months: &["june", "july"],
            },
            export_potential: "low",
            local_demand: "very_high",
        },
    ),
    (
        "onion",
        MarketProfile {
            current_price: 28.0,
            price_trend: "increasing",
            demand_level: "high",
            volatility: "high",
            seasonal_patterns: Seasonality {
                peak_months: &["may", "june"],
                low_months: &["november", "december"],
            },
            export_potential: "medium",
            local_demand: "very_high",
        },
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Accessibility {
    pub accessibility_score: u8,
    pub nearest_market_km: u32,
    pub transportation_cost: &'static str,
    pub market_infrastructure: &'static str,
    pub cold_storage_availability: &'static str,
}

const URBAN_ACCESS: Accessibility = Accessibility {
    accessibility_score: 7,
    nearest_market_km: 15,
    transportation_cost: "low",
    market_infrastructure: "good",
    cold_storage_availability: "high",
};

const RURAL_ACCESS: Accessibility = Accessibility {
    accessibility_score: 5,
    nearest_market_km: 35,
    transportation_cost: "medium",
    market_infrastructure: "fair",
    cold_storage_availability: "medium",
};

#[derive(Debug, Clone, Serialize)]
pub struct CropMarket {
    #[serde(flatten)]
    pub profile: &'static MarketProfile,
    pub market_accessibility: Accessibility,
}

#[derive(Debug, Clone, Serialize)]
pub struct SellingChannel {
    pub recommended_for: Vec<String>,
    pub benefits: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingStrategy {
    pub direct_selling: SellingChannel,
    pub contract_farming: SellingChannel,
    pub cooperative_selling: SellingChannel,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketingRecommendation {
    pub strategy: &'static str,
    pub description: &'static str,
    pub applicable_crops: Vec<String>,
    pub implementation: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketRisks {
    pub identified_risks: Vec<String>,
    pub mitigation_strategies: Vec<&'static str>,
    pub overall_risk_level: &'static str,
    /// Out of 10.
    pub risk_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketAnalysis {
    #[serde(serialize_with = "crate::serialize_pairs")]
    pub crop_market_analysis: Vec<(String, CropMarket)>,
    pub market_insights: Vec<String>,
    pub pricing_strategy: PricingStrategy,
    pub marketing_recommendations: Vec<MarketingRecommendation>,
    pub risk_assessment: MarketRisks,
    /// Demand by crop group from the shared market table.
    #[serde(serialize_with = "crate::serialize_pairs")]
    pub demand_outlook: &'static [(&'static str, &'static str)],
}

/// Price profile for a crop, matched case-insensitively. Unknown crops get
/// the default profile.
pub fn market_profile(crop: &str) -> &'static MarketProfile {
    let crop = crop.to_lowercase();
    PROFILES
        .iter()
        .find(|(name, _)| *name == crop)
        .map_or(&DEFAULT_PROFILE, |(_, profile)| profile)
}

/// Market access from a location; known cities count as urban.
pub fn accessibility(location: &str) -> Accessibility {
    let location = location.to_lowercase();
    if URBAN_MARKETS.iter().any(|city| location.contains(city)) {
        URBAN_ACCESS
    } else {
        RURAL_ACCESS
    }
}

fn high(level: &str) -> bool {
    matches!(level, "high" | "very_high")
}

/// Names of the analysed crops whose profile satisfies `pred`.
fn crops_where(
    analysis: &[(String, CropMarket)],
    pred: impl Fn(&MarketProfile) -> bool,
) -> Vec<String> {
    analysis
        .iter()
        .filter(|(_, market)| pred(market.profile))
        .map(|(name, _)| name.clone())
        .collect()
}

fn insights(analysis: &[(String, CropMarket)]) -> Vec<String> {
    let groups = [
        (
            "High-value crops identified",
            crops_where(analysis, |p| p.current_price > HIGH_VALUE_PRICE),
        ),
        ("Crops with stable demand", crops_where(analysis, |p| high(p.demand_level))),
        ("Export potential crops", crops_where(analysis, |p| high(p.export_potential))),
        ("Monitor price volatility for", crops_where(analysis, |p| high(p.volatility))),
    ];
    groups
        .into_iter()
        .filter(|(_, names)| !names.is_empty())
        .map(|(label, names)| format!("{label}: {}", names.join(", ")))
        .collect()
}

fn pricing_strategy(analysis: &[(String, CropMarket)]) -> PricingStrategy {
    PricingStrategy {
        direct_selling: SellingChannel {
            recommended_for: crops_where(analysis, |p| high(p.local_demand)),
            benefits: &[
                "Higher margins",
                "Direct customer relationship",
                "Reduced middleman costs",
            ],
        },
        contract_farming: SellingChannel {
            recommended_for: crops_where(analysis, |p| high(p.volatility)),
            benefits: &["Price stability", "Assured market", "Input support"],
        },
        cooperative_selling: SellingChannel {
            recommended_for: crops_where(analysis, |p| high(p.export_potential)),
            benefits: &[
                "Better negotiation power",
                "Bulk selling advantages",
                "Shared logistics",
            ],
        },
    }
}

fn marketing_recommendations(crops: &[String]) -> Vec<MarketingRecommendation> {
    let processable = crops
        .iter()
        .filter(|c| VALUE_ADDITION_CROPS.contains(&c.to_lowercase().as_str()))
        .cloned()
        .collect();

    vec![
        MarketingRecommendation {
            strategy: "Digital Marketing",
            description: "Use online platforms to reach customers directly",
            applicable_crops: crops.to_vec(),
            implementation: &[
                "Create social media presence",
                "List on agricultural marketplaces",
                "Use WhatsApp for customer communication",
            ],
        },
        MarketingRecommendation {
            strategy: "Value Addition",
            description: "Process crops to increase market value",
            applicable_crops: processable,
            implementation: &[
                "Basic processing (cleaning, grading)",
                "Packaging and branding",
                "Organic certification",
            ],
        },
        MarketingRecommendation {
            strategy: "Farmer Producer Organizations (FPO)",
            description: "Join or form FPOs for collective marketing",
            applicable_crops: crops.to_vec(),
            implementation: &[
                "Join existing FPOs in the area",
                "Participate in collective bargaining",
                "Share transportation and storage costs",
            ],
        },
    ]
}

fn assess_risks(analysis: &[(String, CropMarket)]) -> MarketRisks {
    let mut identified_risks = Vec::new();
    let mut mitigation_strategies = Vec::new();

    let volatile = crops_where(analysis, |p| high(p.volatility));
    if !volatile.is_empty() {
        identified_risks.push(format!("High price volatility in {}", volatile.join(", ")));
        mitigation_strategies.push("Consider contract farming for volatile crops");
    }

    if analysis.len() < MIN_DIVERSIFIED {
        identified_risks.push("Limited crop diversification increases market risk".to_string());
        mitigation_strategies.push("Diversify crop portfolio to spread market risk");
    }

    identified_risks.push("Seasonal demand fluctuations may affect prices".to_string());
    mitigation_strategies.push("Plan harvest timing to avoid market gluts");

    MarketRisks {
        identified_risks,
        mitigation_strategies,
        overall_risk_level: "Medium",
        risk_score: 6.5,
    }
}

/// Analyse market potential for `crops` grown near `location`. Repeated crop
/// names are analysed once.
pub fn analyze_market_potential(crops: &[&str], location: &str) -> MarketAnalysis {
    let mut names: Vec<String> = Vec::with_capacity(crops.len());
    for crop in crops {
        if !names.iter().any(|n| n == crop) {
            names.push((*crop).to_string());
        }
    }

    let access = accessibility(location);
    let crop_market_analysis: Vec<(String, CropMarket)> = names
        .iter()
        .map(|name| {
            let market = CropMarket {
                profile: market_profile(name),
                market_accessibility: access,
            };
            (name.clone(), market)
        })
        .collect();

    tracing::debug!(
        location,
        crops = names.len(),
        accessibility = access.accessibility_score,
        "market analysis"
    );

    MarketAnalysis {
        market_insights: insights(&crop_market_analysis),
        pricing_strategy: pricing_strategy(&crop_market_analysis),
        marketing_recommendations: marketing_recommendations(&names),
        risk_assessment: assess_risks(&crop_market_analysis),
        demand_outlook: market_data().demand_patterns,
        crop_market_analysis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_crop_profile() {
        let rice = market_profile("Rice");
        assert_eq!(rice.current_price, 22.0);
        assert_eq!(rice.price_trend, "increasing");
        assert_eq!(rice.export_potential, "high");
        assert_eq!(rice.seasonal_patterns.peak_months, ["october", "november"]);
    }

    #[test]
    fn test_unknown_crop_uses_default_profile() {
        let millets = market_profile("Millets");
        assert_eq!(millets.current_price, 25.0);
        assert_eq!(millets.price_trend, "stable");
        assert_eq!(millets.local_demand, "high");
        assert!(std::ptr::eq(millets, &DEFAULT_PROFILE));
    }

    #[test]
    fn test_urban_and_rural_access() {
        let urban = accessibility("Pune, Maharashtra");
        assert_eq!(urban.accessibility_score, 7);
        assert_eq!(urban.nearest_market_km, 15);
        assert_eq!(urban.transportation_cost, "low");

        let rural = accessibility("Alappuzha, Kerala");
        assert_eq!(rural.accessibility_score, 5);
        assert_eq!(rural.nearest_market_km, 35);
        assert_eq!(rural.market_infrastructure, "fair");
    }

    #[test]
    fn test_insights_and_risks() {
        let analysis = analyze_market_potential(&["Cotton", "Soybean"], "Nagpur");
        assert_eq!(
            analysis.market_insights,
            vec![
                "High-value crops identified: Cotton, Soybean",
                "Crops with stable demand: Cotton, Soybean",
                "Export potential crops: Cotton, Soybean",
                "Monitor price volatility for: Cotton",
            ]
        );
        assert_eq!(analysis.pricing_strategy.contract_farming.recommended_for, ["Cotton"]);
        assert_eq!(analysis.pricing_strategy.direct_selling.recommended_for, ["Soybean"]);

        let risks = &analysis.risk_assessment;
        assert_eq!(risks.identified_risks[0], "High price volatility in Cotton");
        assert_eq!(
            risks.identified_risks[1],
            "Limited crop diversification increases market risk"
        );
        assert_eq!(risks.identified_risks.len(), 3);
        assert_eq!(risks.mitigation_strategies.len(), 3);
    }

    #[test]
    fn test_diversified_portfolio_skips_concentration_risk() {
        let analysis = analyze_market_potential(&["Rice", "Wheat", "Maize", "Rice"], "Delhi");
        assert_eq!(analysis.crop_market_analysis.len(), 3);
        assert_eq!(
            analysis.risk_assessment.identified_risks,
            vec!["Seasonal demand fluctuations may affect prices"]
        );
        let value_addition = &analysis.marketing_recommendations[1];
        assert_eq!(value_addition.applicable_crops, ["Rice", "Wheat", "Maize"]);
    }

    #[test]
    fn test_serializes_crop_map() {
        let v = serde_json::to_value(analyze_market_potential(&["Rice"], "Mumbai")).unwrap();
        let rice = &v["crop_market_analysis"]["Rice"];
        assert_eq!(rice["current_price"], 22.0);
        assert_eq!(rice["price_volatility"], "low");
        assert_eq!(rice["market_accessibility"]["accessibility_score"], 7);
        assert_eq!(v["demand_outlook"]["food_grains"], "consistent_high");
        assert_eq!(v["risk_assessment"]["risk_score"], 6.5);
    }

    #[test]
    fn test_empty_crop_list() {
        let analysis = analyze_market_potential(&[], "anywhere");
        assert!(analysis.market_insights.is_empty());
        assert!(analysis.marketing_recommendations[0].applicable_crops.is_empty());
        assert_eq!(analysis.risk_assessment.identified_risks.len(), 2);
    }
}
