// Drop features that cannot be shown as a paddock polygon
use crate::config::MIN_RING_POSITIONS;
use crate::models::Feature;

const POLYGON: &str = "Polygon";

/// A paddock needs properties and a Polygon geometry whose first ring has
/// more than `MIN_RING_POSITIONS` positions. A missing or non-array first
/// ring rejects the feature.
pub fn is_paddock_polygon(feature: &Feature) -> bool {
    let geometry = match &feature.geometry {
        Some(geometry) => geometry,
        None => return false,
    };

    feature.properties.is_some()
        && geometry.is_type(POLYGON)
        && geometry.coordinates.is_array()
        && feature
            .exterior_ring()
            .map_or(false, |ring| ring.len() > MIN_RING_POSITIONS)
}

/// Stable filter: kept features stay in their input order.
pub fn filter_invalid_features(features: Vec<Feature>) -> Vec<Feature> {
    features.into_iter().filter(is_paddock_polygon).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn polygon(name: &str, ring_len: usize) -> Feature {
        let ring: Vec<Value> = (0..ring_len).map(|i| json!([i as f64, 0.0])).collect();
        Feature::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [ring] },
            "properties": { "name": name }
        }))
    }

    #[test]
    fn test_ring_length_boundary() {
        assert!(!is_paddock_polygon(&polygon("four", 4)));
        assert!(is_paddock_polygon(&polygon("five", 5)));
        assert!(is_paddock_polygon(&polygon("nine", 9)));
    }

    #[test]
    fn test_rejects_malformed_features() {
        let cases = [
            json!(null),
            json!({ "properties": {} }),
            json!({ "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]] } }),
            json!({
                "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]] },
                "properties": null
            }),
            json!({ "geometry": { "type": "Point", "coordinates": [0, 0] }, "properties": {} }),
            json!({ "geometry": { "type": "Polygon", "coordinates": "nope" }, "properties": {} }),
            json!({ "geometry": { "type": "Polygon", "coordinates": [] }, "properties": {} }),
            json!({ "geometry": { "type": "Polygon", "coordinates": [7] }, "properties": {} }),
            json!({ "geometry": { "type": "Polygon" }, "properties": {} }),
            json!({ "geometry": { "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]] }, "properties": {} }),
        ];

        for value in cases {
            let feature = Feature::from_value(value.clone());
            assert!(!is_paddock_polygon(&feature), "{} was kept", value);
        }
    }

    #[test]
    fn test_filter_is_stable_and_idempotent() {
        let features = vec![
            polygon("a", 5),
            polygon("b", 3),
            polygon("c", 6),
            Feature::default(),
            polygon("d", 5),
        ];

        let once = filter_invalid_features(features);
        let names: Vec<_> = once
            .iter()
            .map(|f| f.properties.as_ref().and_then(|p| p.name.clone()).unwrap())
            .collect();
        assert_eq!(names, vec!["a", "c", "d"]);

        let twice = filter_invalid_features(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_properties_object_counts_as_present() {
        let feature = Feature::from_value(json!({
            "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]] },
            "properties": {}
        }));
        assert!(is_paddock_polygon(&feature));
    }
}
