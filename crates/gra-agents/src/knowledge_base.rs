//! Static agricultural reference data: crops, government schemes, market trends.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Crop {
    pub name: &'static str,
    pub category: &'static str,
    pub climate_zones: &'static [&'static str],
    pub soil_types: &'static [&'static str],
    pub water_requirement: &'static str,
    pub season: &'static str,
    pub planting_months: &'static [&'static str],
    pub growth_duration_days: u32,
    pub yield_per_acre_kg: f64,
    pub market_price_per_kg: f64,
    pub input_cost_per_acre: f64,
    /// Risk name → tolerance level (`low`, `medium`, `high`, `very_high`).
    #[serde(serialize_with = "crate::serialize_pairs")]
    pub risk_tolerance: &'static [(&'static str, &'static str)],
}

impl Crop {
    pub fn tolerance(&self, risk: &str) -> Option<&'static str> {
        self.risk_tolerance
            .iter()
            .find(|(r, _)| *r == risk)
            .map(|(_, level)| *level)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Subsidy {
    pub amount: f64,
    pub percentage: f64,
    pub max_limit: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Loan {
    pub amount: f64,
    pub interest_rate: f64,
    pub tenure_years: u32,
}

/// Farm size bounds in acres. `max: None` means unbounded.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SizeRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl SizeRange {
    pub fn contains(&self, size: f64) -> bool {
        size >= self.min && self.max.is_none_or(|max| size <= max)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Eligibility {
    pub farm_size: SizeRange,
    /// Empty for national schemes.
    pub states: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct Application {
    pub period: &'static str,
    pub complexity: &'static str,
    pub processing_days: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scheme {
    pub name: &'static str,
    pub description: &'static str,
    pub categories: &'static [&'static str],
    pub objectives: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsidy: Option<Subsidy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan: Option<Loan>,
    pub eligibility: Eligibility,
    pub application: Application,
    pub required_documents: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceTrend {
    pub crop: &'static str,
    pub current: f64,
    pub trend: &'static str,
    pub volatility: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketData {
    pub price_trends: &'static [PriceTrend],
    #[serde(serialize_with = "crate::serialize_pairs")]
    pub demand_patterns: &'static [(&'static str, &'static str)],
}

static CROPS: &[Crop] = &[
    Crop {
        name: "Rice",
        category: "food_grain",
        climate_zones: &["tropical", "subtropical"],
        soil_types: &["clay", "loamy"],
        water_requirement: "high",
        season: "kharif",
        planting_months: &["june", "july"],
        growth_duration_days: 120,
        yield_per_acre_kg: 2500.0,
        market_price_per_kg: 22.0,
        input_cost_per_acre: 25000.0,
        risk_tolerance: &[
            ("drought", "low"),
            ("flooding", "high"),
            ("heat_waves", "medium"),
            ("irregular_rainfall", "medium"),
        ],
    },
    Crop {
        name: "Wheat",
        category: "food_grain",
        climate_zones: &["temperate", "subtropical"],
        soil_types: &["loamy", "sandy"],
        water_requirement: "medium",
        season: "rabi",
        planting_months: &["november", "december"],
        growth_duration_days: 150,
        yield_per_acre_kg: 2000.0,
        market_price_per_kg: 20.0,
        input_cost_per_acre: 20000.0,
        risk_tolerance: &[
            ("drought", "medium"),
            ("flooding", "low"),
            ("heat_waves", "low"),
            ("temperature_fluctuations", "high"),
        ],
    },
    Crop {
        name: "Cotton",
        category: "cash_crop",
        climate_zones: &["tropical", "subtropical"],
        soil_types: &["black", "loamy"],
        water_requirement: "medium",
        season: "kharif",
        planting_months: &["may", "june"],
        growth_duration_days: 180,
        yield_per_acre_kg: 500.0,
        market_price_per_kg: 55.0,
        input_cost_per_acre: 30000.0,
        risk_tolerance: &[
            ("drought", "high"),
            ("heat_waves", "high"),
            ("irregular_rainfall", "high"),
            ("pest_attacks", "medium"),
        ],
    },
    Crop {
        name: "Sugarcane",
        category: "cash_crop",
        climate_zones: &["tropical", "subtropical"],
        soil_types: &["loamy", "clay"],
        water_requirement: "high",
        season: "both",
        planting_months: &["february", "march", "october"],
        growth_duration_days: 365,
        yield_per_acre_kg: 50000.0,
        market_price_per_kg: 3.0,
        input_cost_per_acre: 40000.0,
        risk_tolerance: &[
            ("drought", "low"),
            ("flooding", "medium"),
            ("heat_waves", "medium"),
            ("water_scarcity", "low"),
        ],
    },
    Crop {
        name: "Soybean",
        category: "oilseed",
        climate_zones: &["tropical", "subtropical"],
        soil_types: &["black", "loamy"],
        water_requirement: "medium",
        season: "kharif",
        planting_months: &["june", "july"],
        growth_duration_days: 100,
        yield_per_acre_kg: 1200.0,
        market_price_per_kg: 45.0,
        input_cost_per_acre: 18000.0,
        risk_tolerance: &[
            ("drought", "high"),
            ("irregular_rainfall", "high"),
            ("heat_waves", "medium"),
            ("soil_degradation", "low"),
        ],
    },
    Crop {
        name: "Maize",
        category: "food_grain",
        climate_zones: &["tropical", "temperate"],
        soil_types: &["loamy", "sandy"],
        water_requirement: "medium",
        season: "both",
        planting_months: &["june", "november"],
        growth_duration_days: 90,
        yield_per_acre_kg: 2200.0,
        market_price_per_kg: 18.0,
        input_cost_per_acre: 15000.0,
        risk_tolerance: &[
            ("drought", "medium"),
            ("heat_waves", "high"),
            ("irregular_rainfall", "medium"),
            ("temperature_fluctuations", "high"),
        ],
    },
    Crop {
        name: "Tomato",
        category: "vegetable",
        climate_zones: &["tropical", "subtropical"],
        soil_types: &["loamy", "sandy"],
        water_requirement: "high",
        season: "both",
        planting_months: &["june", "november"],
        growth_duration_days: 75,
        yield_per_acre_kg: 15000.0,
        market_price_per_kg: 35.0,
        input_cost_per_acre: 35000.0,
        risk_tolerance: &[
            ("heat_waves", "low"),
            ("irregular_rainfall", "low"),
            ("pest_attacks", "low"),
            ("flooding", "low"),
        ],
    },
    Crop {
        name: "Onion",
        category: "vegetable",
        climate_zones: &["tropical", "subtropical"],
        soil_types: &["loamy", "sandy"],
        water_requirement: "medium",
        season: "both",
        planting_months: &["june", "november"],
        growth_duration_days: 120,
        yield_per_acre_kg: 8000.0,
        market_price_per_kg: 28.0,
        input_cost_per_acre: 25000.0,
        risk_tolerance: &[
            ("drought", "medium"),
            ("heat_waves", "medium"),
            ("irregular_rainfall", "medium"),
            ("flooding", "low"),
        ],
    },
    Crop {
        name: "Millets",
        category: "food_grain",
        climate_zones: &["arid", "semi_arid"],
        soil_types: &["sandy", "loamy"],
        water_requirement: "low",
        season: "kharif",
        planting_months: &["june", "july"],
        growth_duration_days: 75,
        yield_per_acre_kg: 800.0,
        market_price_per_kg: 35.0,
        input_cost_per_acre: 8000.0,
        risk_tolerance: &[
            ("drought", "very_high"),
            ("heat_waves", "very_high"),
            ("irregular_rainfall", "very_high"),
            ("water_scarcity", "very_high"),
        ],
    },
    Crop {
        name: "Groundnut",
        category: "oilseed",
        climate_zones: &["tropical", "subtropical"],
        soil_types: &["sandy", "loamy"],
        water_requirement: "medium",
        season: "both",
        planting_months: &["june", "november"],
        growth_duration_days: 110,
        yield_per_acre_kg: 1500.0,
        market_price_per_kg: 50.0,
        input_cost_per_acre: 20000.0,
        risk_tolerance: &[
            ("drought", "high"),
            ("heat_waves", "high"),
            ("irregular_rainfall", "high"),
            ("soil_degradation", "medium"),
        ],
    },
];

static SCHEMES: &[Scheme] = &[
    Scheme {
        name: "Pradhan Mantri Krishi Sinchai Yojana (PMKSY)",
        description: "Irrigation infrastructure development and water conservation",
        categories: &["water_management", "infrastructure"],
        objectives: &[
            "Expand cultivated area under assured irrigation",
            "Improve water use efficiency",
            "Promote precision irrigation",
        ],
        subsidy: Some(Subsidy { amount: 75000.0, percentage: 75.0, max_limit: 200000.0 }),
        loan: None,
        eligibility: Eligibility {
            farm_size: SizeRange { min: 0.5, max: Some(10.0) },
            states: &[],
        },
        application: Application {
            period: "April-September",
            complexity: "medium",
            processing_days: 45,
        },
        required_documents: &[
            "Land Records (7/12, 8A)",
            "Aadhaar Card",
            "Bank Account Details",
            "Water Source Certificate",
        ],
    },
    Scheme {
        name: "Soil Health Management Scheme",
        description: "Soil testing and health improvement initiatives",
        categories: &["soil_management", "crop_development"],
        objectives: &[
            "Promote soil health through soil health cards",
            "Encourage balanced use of fertilizers",
            "Improve soil organic content",
        ],
        subsidy: Some(Subsidy { amount: 15000.0, percentage: 100.0, max_limit: 25000.0 }),
        loan: None,
        eligibility: Eligibility {
            farm_size: SizeRange { min: 0.0, max: None },
            states: &[],
        },
        application: Application {
            period: "Year-round",
            complexity: "easy",
            processing_days: 15,
        },
        required_documents: &["Land Records", "Aadhaar Card", "Soil Health Card"],
    },
    Scheme {
        name: "National Mission for Sustainable Agriculture (NMSA)",
        description: "Climate resilient agriculture and sustainable farming practices",
        categories: &["climate_adaptation", "sustainable_farming"],
        objectives: &[
            "Promote climate resilient agriculture",
            "Enhance soil health and water conservation",
            "Mainstream rainfed area development",
        ],
        subsidy: Some(Subsidy { amount: 50000.0, percentage: 60.0, max_limit: 100000.0 }),
        loan: None,
        eligibility: Eligibility {
            farm_size: SizeRange { min: 1.0, max: Some(20.0) },
            states: &[],
        },
        application: Application {
            period: "March-August",
            complexity: "medium",
            processing_days: 60,
        },
        required_documents: &[
            "Land Records",
            "Aadhaar Card",
            "Bank Account Details",
            "Project Proposal",
        ],
    },
    Scheme {
        name: "Pradhan Mantri Fasal Bima Yojana (PMFBY)",
        description: "Crop insurance scheme for risk mitigation",
        categories: &["insurance", "risk_management"],
        objectives: &[
            "Provide insurance coverage for crops",
            "Stabilize income of farmers",
            "Encourage adoption of innovative practices",
        ],
        subsidy: Some(Subsidy { amount: 20000.0, percentage: 95.0, max_limit: 50000.0 }),
        loan: None,
        eligibility: Eligibility {
            farm_size: SizeRange { min: 0.0, max: None },
            states: &[],
        },
        application: Application {
            period: "Before sowing season",
            complexity: "easy",
            processing_days: 7,
        },
        required_documents: &[
            "Land Records",
            "Aadhaar Card",
            "Bank Account Details",
            "Sowing Certificate",
        ],
    },
    Scheme {
        name: "Kisan Credit Card (KCC)",
        description: "Credit support for agricultural activities",
        categories: &["credit_support", "finance"],
        objectives: &[
            "Provide adequate and timely credit",
            "Meet consumption requirements",
            "Support post-harvest expenses",
        ],
        subsidy: None,
        loan: Some(Loan { amount: 300000.0, interest_rate: 7.0, tenure_years: 5 }),
        eligibility: Eligibility {
            farm_size: SizeRange { min: 0.0, max: None },
            states: &[],
        },
        application: Application {
            period: "Year-round",
            complexity: "easy",
            processing_days: 15,
        },
        required_documents: &[
            "Land Records",
            "Aadhaar Card",
            "Bank Account Details",
            "Income Certificate",
        ],
    },
    Scheme {
        name: "Sub-Mission on Agricultural Mechanization (SMAM)",
        description: "Promote farm mechanization for efficient farming",
        categories: &["mechanization", "technology"],
        objectives: &[
            "Increase reach of farm mechanization",
            "Promote custom hiring centers",
            "Create awareness on farm machinery",
        ],
        subsidy: Some(Subsidy { amount: 80000.0, percentage: 50.0, max_limit: 150000.0 }),
        loan: None,
        eligibility: Eligibility {
            farm_size: SizeRange { min: 2.0, max: Some(50.0) },
            states: &[],
        },
        application: Application {
            period: "April-October",
            complexity: "medium",
            processing_days: 30,
        },
        required_documents: &[
            "Land Records",
            "Aadhaar Card",
            "Bank Account Details",
            "Machinery Quotation",
        ],
    },
];

static MARKET: MarketData = MarketData {
    price_trends: &[
        PriceTrend { crop: "rice", current: 22.0, trend: "stable", volatility: "low" },
        PriceTrend { crop: "wheat", current: 20.0, trend: "increasing", volatility: "low" },
        PriceTrend { crop: "cotton", current: 55.0, trend: "volatile", volatility: "high" },
        PriceTrend { crop: "soybean", current: 45.0, trend: "increasing", volatility: "medium" },
    ],
    demand_patterns: &[
        ("food_grains", "consistent_high"),
        ("cash_crops", "market_dependent"),
        ("vegetables", "seasonal_high"),
        ("oilseeds", "increasing"),
    ],
};

pub fn crops() -> &'static [Crop] {
    CROPS
}

pub fn schemes() -> &'static [Scheme] {
    SCHEMES
}

pub fn market_data() -> &'static MarketData {
    &MARKET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(crops().len(), 10);
        assert_eq!(schemes().len(), 6);
        assert_eq!(market_data().price_trends.len(), 4);
    }

    #[test]
    fn test_crop_serializes_risk_tolerance_as_object() {
        let v = serde_json::to_value(&crops()[0]).unwrap();
        assert_eq!(v["name"], "Rice");
        assert_eq!(v["risk_tolerance"]["flooding"], "high");
        assert_eq!(v["planting_months"][0], "june");
    }

    #[test]
    fn test_scheme_serialization_skips_absent_parts() {
        let kcc = schemes().iter().find(|s| s.name.contains("KCC")).unwrap();
        let v = serde_json::to_value(kcc).unwrap();
        assert!(v.get("subsidy").is_none());
        assert_eq!(v["loan"]["amount"], 300000.0);
        assert!(v["eligibility"]["farm_size"]["max"].is_null());
    }

    #[test]
    fn test_size_range() {
        let r = SizeRange { min: 0.5, max: Some(10.0) };
        assert!(r.contains(0.5));
        assert!(r.contains(10.0));
        assert!(!r.contains(0.4));
        assert!(!r.contains(10.5));
        assert!(SizeRange { min: 0.0, max: None }.contains(1e9));
    }

    #[test]
    fn test_tolerance_lookup() {
        let millets = crops().iter().find(|c| c.name == "Millets").unwrap();
        assert_eq!(millets.tolerance("drought"), Some("very_high"));
        assert_eq!(millets.tolerance("flooding"), None);
    }
}
