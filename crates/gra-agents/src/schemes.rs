//! Government scheme matching.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::FarmDetails;
use crate::knowledge_base::{Scheme, schemes};

pub const TOP_SCHEMES: usize = 5;

/// Project cost assumed when working out the farmer's share.
const ASSUMED_PROJECT_COST: f64 = 100_000.0;

/// Fraction of a loan counted as savings.
const LOAN_BENEFIT_RATE: f64 = 0.3;

const COMMON_DOCUMENTS: &[&str] = &[
    "Aadhaar Card",
    "Land Records (7/12, 8A)",
    "Bank Account Details",
    "Passport Size Photos",
];

static DOCUMENT_NOTES: &[(&str, &str)] = &[
    ("Aadhaar Card", "Ensure Aadhaar is linked to mobile number"),
    ("Land Records (7/12, 8A)", "Get latest copy from village office"),
    ("Bank Account Details", "Ensure account is active and linked to Aadhaar"),
    ("Soil Health Card", "Get from nearest Krishi Vigyan Kendra"),
    ("Income Certificate", "Valid for 1 year from issue date"),
    ("Caste Certificate", "Required for SC/ST/OBC schemes"),
];

/// Output bucket and the category keywords that land a scheme in it. A
/// category goes to the first bucket that matches.
static CATEGORY_BUCKETS: &[(&str, &[&str])] = &[
    ("infrastructure", &["infrastructure", "equipment", "machinery"]),
    ("crop_development", &["crop", "seed", "fertilizer"]),
    ("water_management", &["water", "irrigation", "drip"]),
    ("technology", &["technology", "digital", "precision"]),
    ("credit_support", &["credit", "loan", "finance"]),
    ("insurance", &["insurance", "risk", "protection"]),
];

#[derive(Debug, Clone, Serialize)]
pub struct RankedScheme {
    #[serde(flatten)]
    pub scheme: &'static Scheme,
    pub relevance_score: u32,
    pub matching_goals: Vec<String>,
    pub priority_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubsidyTotals {
    pub total_subsidy_amount: f64,
    pub total_loan_amount: f64,
    pub estimated_savings: f64,
    pub farmer_contribution_required: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    pub scheme_name: &'static str,
    pub application_period: &'static str,
    /// Days.
    pub processing_time: u32,
    pub priority_order: usize,
    pub recommended_start_date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItem {
    pub document: &'static str,
    pub status: &'static str,
    pub notes: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentRequirements {
    pub common_documents: &'static [&'static str],
    pub all_required_documents: Vec<&'static str>,
    #[serde(serialize_with = "crate::serialize_pairs")]
    pub scheme_specific_documents: Vec<(&'static str, &'static [&'static str])>,
    pub document_checklist: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemeRecommendations {
    pub recommended_schemes: Vec<RankedScheme>,
    pub total_potential_subsidy: SubsidyTotals,
    pub application_timeline: Vec<TimelineEntry>,
    pub required_documents: DocumentRequirements,
    /// Non-empty buckets only.
    #[serde(serialize_with = "crate::serialize_pairs")]
    pub scheme_categories: Vec<(&'static str, Vec<&'static str>)>,
}

fn eligible(scheme: &Scheme, farm_size: f64, location: &str) -> bool {
    let states = scheme.eligibility.states;
    scheme.eligibility.farm_size.contains(farm_size)
        && (states.is_empty() || states.iter().any(|s| location.contains(&s.to_lowercase())))
}

/// Relevance of `scheme` to the goals: +2 per objective and +1 per category
/// sharing a word with a goal. Returns the score and the goals that matched.
pub fn relevance(scheme: &Scheme, goals: &[String]) -> (u32, Vec<String>) {
    let mut score = 0;
    let mut matched = Vec::new();

    for goal in goals {
        let lower = goal.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();
        let hits = |text: &str| {
            let text = text.to_lowercase();
            words.iter().any(|w| text.contains(w))
        };

        let objective_hits = scheme.objectives.iter().filter(|o| hits(**o)).count() as u32;
        let category_hits = scheme.categories.iter().filter(|c| hits(**c)).count() as u32;
        score += objective_hits * 2 + category_hits;
        if objective_hits + category_hits > 0 {
            matched.push(goal.clone());
        }
    }

    (score, matched)
}

pub fn priority(scheme: &Scheme, relevance_score: u32) -> u32 {
    let mut score = relevance_score;

    let subsidy = scheme.subsidy.map_or(0.0, |s| s.amount);
    if subsidy > 50_000.0 {
        score += 3;
    } else if subsidy > 20_000.0 {
        score += 2;
    } else if subsidy > 5_000.0 {
        score += 1;
    }

    match scheme.application.complexity {
        "easy" => score += 2,
        "medium" => score += 1,
        _ => {}
    }

    score
}

/// Eligible schemes that match at least one goal, highest priority first.
pub fn rank_schemes(farm: &FarmDetails, goals: &[String]) -> Vec<RankedScheme> {
    let location = farm.location.to_lowercase();
    let mut ranked: Vec<RankedScheme> = schemes()
        .iter()
        .filter(|s| eligible(s, farm.farm_size, &location))
        .filter_map(|scheme| {
            let (relevance_score, matching_goals) = relevance(scheme, goals);
            (relevance_score > 0).then(|| RankedScheme {
                scheme,
                relevance_score,
                matching_goals,
                priority_score: priority(scheme, relevance_score),
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
    ranked
}

pub fn subsidy_totals(top: &[RankedScheme]) -> SubsidyTotals {
    let subsidy: f64 = top.iter().filter_map(|r| r.scheme.subsidy).map(|s| s.amount).sum();
    let loan: f64 = top.iter().filter_map(|r| r.scheme.loan).map(|l| l.amount).sum();
    SubsidyTotals {
        total_subsidy_amount: subsidy,
        total_loan_amount: loan,
        estimated_savings: subsidy + loan * LOAN_BENEFIT_RATE,
        farmer_contribution_required: (ASSUMED_PROJECT_COST - subsidy).max(0.0),
    }
}

fn application_timeline(top: &[RankedScheme]) -> Vec<TimelineEntry> {
    top.iter()
        .enumerate()
        .map(|(i, r)| TimelineEntry {
            scheme_name: r.scheme.name,
            application_period: r.scheme.application.period,
            processing_time: r.scheme.application.processing_days,
            priority_order: i + 1,
            recommended_start_date: format!("Month {}", i + 1),
        })
        .collect()
}

fn document_note(document: &str) -> &'static str {
    DOCUMENT_NOTES
        .iter()
        .find(|(d, _)| *d == document)
        .map_or("Ensure document is valid and up-to-date", |(_, n)| *n)
}

fn required_documents(top: &[RankedScheme]) -> DocumentRequirements {
    let all: BTreeSet<&'static str> = top
        .iter()
        .flat_map(|r| r.scheme.required_documents.iter().copied())
        .collect();

    DocumentRequirements {
        common_documents: COMMON_DOCUMENTS,
        scheme_specific_documents: top
            .iter()
            .map(|r| (r.scheme.name, r.scheme.required_documents))
            .collect(),
        document_checklist: all
            .iter()
            .map(|&document| ChecklistItem {
                document,
                status: "pending",
                notes: document_note(document),
            })
            .collect(),
        all_required_documents: all.into_iter().collect(),
    }
}

fn categorize(ranked: &[RankedScheme]) -> Vec<(&'static str, Vec<&'static str>)> {
    let mut buckets: Vec<(&'static str, Vec<&'static str>)> =
        CATEGORY_BUCKETS.iter().map(|(name, _)| (*name, Vec::new())).collect();

    for r in ranked {
        for category in r.scheme.categories {
            let lower = category.to_lowercase();
            let slot = CATEGORY_BUCKETS
                .iter()
                .position(|(_, keys)| keys.iter().any(|k| lower.contains(k)));
            if let Some(i) = slot {
                let names = &mut buckets[i].1;
                if !names.contains(&r.scheme.name) {
                    names.push(r.scheme.name);
                }
            }
        }
    }

    buckets.retain(|(_, names)| !names.is_empty());
    buckets
}

pub fn find_relevant_schemes(farm: &FarmDetails, goals: &[String]) -> SchemeRecommendations {
    let ranked = rank_schemes(farm, goals);
    let top: Vec<RankedScheme> = ranked.iter().take(TOP_SCHEMES).cloned().collect();

    tracing::debug!(matched = ranked.len(), "schemes ranked");

    SchemeRecommendations {
        total_potential_subsidy: subsidy_totals(&top),
        application_timeline: application_timeline(&top),
        required_documents: required_documents(&top),
        scheme_categories: categorize(&ranked),
        recommended_schemes: top,
    }
}
