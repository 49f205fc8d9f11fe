// Per-project statistics, recomputed from a group on demand
use serde::{Deserialize, Serialize};

use crate::models::{Feature, GroupedProjectFeatures};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub total_area_acres: f64,
    pub paddock_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedProjectSummary {
    pub project_name: String,
    #[serde(flatten)]
    pub summary: ProjectSummary,
}

// Missing, zero and NaN areas all count as nothing
fn area_contribution(feature: &Feature) -> f64 {
    match feature.area_acres() {
        Some(acres) if !acres.is_nan() => acres,
        _ => 0.0,
    }
}

/// Sum of `area_acres` over a group; an empty group totals 0.
pub fn calculate_total_area(features: &[Feature]) -> f64 {
    features
        .iter()
        .fold(0.0, |total, feature| total + area_contribution(feature))
}

pub fn summarize(features: &[Feature]) -> ProjectSummary {
    ProjectSummary {
        total_area_acres: calculate_total_area(features),
        paddock_count: features.len(),
    }
}

pub fn summarize_projects(grouped: &GroupedProjectFeatures) -> Vec<NamedProjectSummary> {
    grouped
        .iter()
        .map(|(project_name, features)| NamedProjectSummary {
            project_name: project_name.to_string(),
            summary: summarize(features),
        })
        .collect()
}
