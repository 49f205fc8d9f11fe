// Ingestion pipeline: raw text -> parse -> validate -> filter -> group
use std::sync::Arc;

use thiserror::Error;

use crate::config::PaddockConfig;
use crate::console_log;
use crate::feature_filter::filter_invalid_features;
use crate::grouping::group_projects_with_fallback;
use crate::models::GroupedProjectFeatures;
use crate::notifications::{Notification, INVALID_GEOJSON_FORMAT};
use crate::validation::{validate_feature_collection, InvalidReason, Validation};

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("GeoJSON text is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("Not a GeoJSON FeatureCollection: {0}")]
    InvalidFormat(InvalidReason),
}

impl IngestionError {
    // Both failures read the same to the user
    pub fn user_message(&self) -> &'static str {
        INVALID_GEOJSON_FORMAT
    }
}

/// Run the full pipeline over one uploaded document.
pub fn ingest(raw: &str) -> Result<GroupedProjectFeatures, IngestionError> {
    ingest_with_config(raw, &PaddockConfig::default())
}

pub fn ingest_with_config(raw: &str, config: &PaddockConfig) -> Result<GroupedProjectFeatures, IngestionError> {
    let parsed: serde_json::Value = serde_json::from_str(raw)?;

    let collection = match validate_feature_collection(&parsed) {
        Validation::Valid(collection) => collection,
        Validation::Invalid(reason) => return Err(IngestionError::InvalidFormat(reason)),
    };

    let received = collection.features.len();
    let paddocks = filter_invalid_features(collection.features);
    console_log!(
        "Kept {} of {} features as paddocks ({} dropped)",
        paddocks.len(),
        received,
        received - paddocks.len()
    );

    let grouped = group_projects_with_fallback(paddocks, &config.labels.unknown_project);
    console_log!("Grouped paddocks into {} projects", grouped.len());
    Ok(grouped)
}

/// The single "current result" slot plus pending toasts.
///
/// A successful upload replaces the grouping wholesale, even with an empty
/// one. A failed upload queues one error toast and leaves the previous
/// grouping in place.
#[derive(Debug, Default)]
pub struct ProjectSession {
    current: Option<Arc<GroupedProjectFeatures>>,
    notifications: Vec<Notification>,
}

impl ProjectSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_upload(&mut self, raw: &str, config: &PaddockConfig) -> Result<Arc<GroupedProjectFeatures>, IngestionError> {
        match ingest_with_config(raw, config) {
            Ok(grouped) => {
                let grouped = Arc::new(grouped);
                self.current = Some(Arc::clone(&grouped));
                Ok(grouped)
            }
            Err(err) => {
                crate::console::error(&format!("Rejected upload: {}", err));
                self.notify(Notification::error(err.user_message()));
                Err(err)
            }
        }
    }

    pub fn current(&self) -> Option<Arc<GroupedProjectFeatures>> {
        self.current.clone()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationKind;
    use crate::summary::calculate_total_area;
    use serde_json::json;

    const SQUARE: &str = "[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]";

    fn feature(project: &str, ring: &str, area: f64) -> String {
        format!(
            r#"{{"type":"Feature","geometry":{{"type":"Polygon","coordinates":[{}]}},"properties":{{"Project__Name":"{}","area_acres":{}}}}}"#,
            ring, project, area
        )
    }

    fn collection(features: &[String]) -> String {
        format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
    }

    #[test]
    fn test_single_polygon_groups_under_its_project() {
        let grouped = ingest(&collection(&[feature("Test Project", SQUARE, 100.0)])).unwrap();

        assert_eq!(grouped.project_names(), vec!["Test Project"]);
        assert_eq!(grouped.get("Test Project").unwrap().len(), 1);
    }

    #[test]
    fn test_four_point_ring_is_excluded() {
        let ring = "[[0, 0], [1, 0], [1, 1], [0, 0]]";
        let grouped = ingest(&collection(&[
            feature("Degenerate", ring, 10.0),
            feature("Shared", ring, 10.0),
            feature("Shared", SQUARE, 5.0),
        ]))
        .unwrap();

        assert!(grouped.get("Degenerate").is_none());
        assert_eq!(grouped.get("Shared").unwrap().len(), 1);
    }

    #[test]
    fn test_alpha_totals() {
        let grouped = ingest(&collection(&[feature("Alpha", SQUARE, 50.5), feature("Alpha", SQUARE, 75.25)])).unwrap();

        let total = calculate_total_area(grouped.get("Alpha").unwrap());
        assert_eq!(format!("{:.2}", total), "125.75");
    }

    #[test]
    fn test_missing_project_name() {
        let raw = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]] },
                "properties": { "name": "Loose paddock" }
            }]
        })
        .to_string();

        let grouped = ingest(&raw).unwrap();
        assert_eq!(grouped.project_names(), vec!["Unknown Projects"]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(ingest("{ not json"), Err(IngestionError::MalformedJson(_))));
        assert!(matches!(
            ingest(r#"{"type":"Feature","features":[]}"#),
            Err(IngestionError::InvalidFormat(InvalidReason::WrongType(_)))
        ));
        assert_eq!(ingest("").unwrap_err().user_message(), "Invalid GeoJSON format");
    }

    #[test]
    fn test_invalid_upload_keeps_previous_grouping() {
        let config = PaddockConfig::default();
        let mut session = ProjectSession::new();
        session
            .handle_upload(&collection(&[feature("Alpha", SQUARE, 1.0)]), &config)
            .unwrap();

        let err = session.handle_upload(r#"{"type":"Topology","features":[]}"#, &config);
        assert!(err.is_err());

        let notifications = session.take_notifications();
        assert_eq!(notifications, vec![Notification::error("Invalid GeoJSON format")]);
        assert_eq!(notifications[0].kind, NotificationKind::Error);
        assert_eq!(session.current().unwrap().project_names(), vec!["Alpha"]);
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn test_malformed_json_is_reported_not_raised() {
        let config = PaddockConfig::default();
        let mut session = ProjectSession::new();

        assert!(session.handle_upload("]]", &config).is_err());
        assert!(session.current().is_none());
        assert_eq!(session.take_notifications().len(), 1);
    }

    #[test]
    fn test_empty_result_still_replaces_state() {
        let config = PaddockConfig::default();
        let mut session = ProjectSession::new();
        session
            .handle_upload(&collection(&[feature("Alpha", SQUARE, 1.0)]), &config)
            .unwrap();

        let previous = session.current().unwrap();
        session
            .handle_upload(&collection(&[feature("Alpha", "[[0, 0]]", 1.0)]), &config)
            .unwrap();

        let current = session.current().unwrap();
        assert!(current.is_empty());
        // the earlier grouping was replaced, not mutated
        assert_eq!(previous.project_names(), vec!["Alpha"]);
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn test_clear() {
        let config = PaddockConfig::default();
        let mut session = ProjectSession::new();
        session.handle_upload(&collection(&[]), &config).unwrap();
        assert!(session.current().is_some());
        session.clear();
        assert!(session.current().is_none());
    }
}
