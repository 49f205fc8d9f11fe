// Card view models handed to the front end, one per project
use serde::Serialize;

use crate::config::PaddockConfig;
use crate::map_view::PaddockMapView;
use crate::models::{Feature, GroupedProjectFeatures};
use crate::summary::summarize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaddockCard {
    pub key: String,
    pub name_label: String,
    pub owner_label: String,
    pub area_label: String,
    pub map: PaddockMapView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub project_name: String,
    pub total_area_acres: f64,
    pub total_area_label: String,
    pub paddock_count: usize,
    pub paddocks: Vec<PaddockCard>,
}

pub fn build_project_cards(grouped: &GroupedProjectFeatures, config: &PaddockConfig) -> Vec<ProjectCard> {
    grouped
        .iter()
        .map(|(project_name, features)| build_project_card(project_name, features, config))
        .collect()
}

pub fn build_project_card(project_name: &str, features: &[Feature], config: &PaddockConfig) -> ProjectCard {
    let summary = summarize(features);
    ProjectCard {
        project_name: project_name.to_string(),
        total_area_acres: summary.total_area_acres,
        total_area_label: config.format_acres(summary.total_area_acres),
        paddock_count: summary.paddock_count,
        paddocks: features
            .iter()
            .enumerate()
            .map(|(index, feature)| build_paddock_card(index, feature, config))
            .collect(),
    }
}

/// Labels for one paddock. Unlike the project total, a zero or missing
/// area is shown as unknown rather than as 0.
pub fn build_paddock_card(index: usize, feature: &Feature, config: &PaddockConfig) -> PaddockCard {
    let properties = feature.properties.as_ref();
    let text_or_unknown = |value: Option<&String>| {
        value
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| config.labels.unknown.clone())
    };

    let area_label = match feature.area_acres() {
        Some(acres) if acres != 0.0 && !acres.is_nan() => config.format_acres(acres),
        _ => config.labels.unknown_area.clone(),
    };

    PaddockCard {
        key: properties
            .and_then(|p| p.id.as_ref())
            .map(|id| id.to_string())
            .unwrap_or_else(|| index.to_string()),
        name_label: text_or_unknown(properties.and_then(|p| p.name.as_ref())),
        owner_label: text_or_unknown(properties.and_then(|p| p.owner.as_ref())),
        area_label,
        map: PaddockMapView::for_feature(feature, &config.map),
    }
}
