// Map view model for a single paddock: where to centre, how to style it
use geo::Centroid;
use geo_types::{Coord, Geometry as GeoGeometry, LineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde::Serialize;
use serde_json::Value;

use crate::config::{MapConfig, PaddockStyle};
use crate::models::Feature;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaddockMapView {
    pub center: [f64; 2], // [lat, lng] as Leaflet expects
    pub zoom: u8,
    pub tile_url: String,
    pub height: String,
    pub style: PaddockStyle,
    pub feature: Value,
}

impl PaddockMapView {
    pub fn for_feature(feature: &Feature, config: &MapConfig) -> Self {
        Self {
            center: map_center(feature).unwrap_or(config.default_center),
            zoom: config.zoom,
            tile_url: config.tile_url.clone(),
            height: config.height.clone(),
            style: config.style.clone(),
            feature: feature.to_json_value(),
        }
    }
}

/// Centroid of the feature's geometry as `[lat, lng]`.
///
/// GeoJSON positions are `[lng, lat]`; the result is swapped for the map.
/// Returns `None` when there is no geometry, the type is unsupported, or
/// the coordinates do not parse.
pub fn map_center(feature: &Feature) -> Option<[f64; 2]> {
    let geometry = to_geo_geometry(feature)?;
    let centroid = geometry.centroid()?;
    if !centroid.x().is_finite() || !centroid.y().is_finite() {
        return None;
    }
    Some([centroid.y(), centroid.x()])
}

pub fn to_geo_geometry(feature: &Feature) -> Option<GeoGeometry<f64>> {
    let geometry = feature.geometry.as_ref()?;
    let coordinates = &geometry.coordinates;

    match geometry.r#type.as_deref()? {
        "Point" => to_coord(coordinates).map(|c| GeoGeometry::Point(Point::from(c))),
        "MultiPoint" => to_coords(coordinates)
            .map(|coords| GeoGeometry::MultiPoint(MultiPoint::from(coords))),
        "LineString" => to_line_string(coordinates).map(GeoGeometry::LineString),
        "Polygon" => to_polygon(coordinates).map(GeoGeometry::Polygon),
        "MultiPolygon" => {
            let polygons = coordinates
                .as_array()?
                .iter()
                .map(to_polygon)
                .collect::<Option<Vec<_>>>()?;
            Some(GeoGeometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        _ => None,
    }
}

fn to_coord(value: &Value) -> Option<Coord<f64>> {
    let position = value.as_array()?;
    if position.len() < 2 {
        return None;
    }
    Some(Coord {
        x: position[0].as_f64()?,
        y: position[1].as_f64()?,
    })
}

fn to_coords(value: &Value) -> Option<Vec<Coord<f64>>> {
    let coords = value
        .as_array()?
        .iter()
        .map(to_coord)
        .collect::<Option<Vec<_>>>()?;
    if coords.is_empty() {
        None
    } else {
        Some(coords)
    }
}

fn to_line_string(value: &Value) -> Option<LineString<f64>> {
    to_coords(value).map(LineString::new)
}

// First ring is the exterior, the rest are holes
fn to_polygon(value: &Value) -> Option<Polygon<f64>> {
    let mut rings = value
        .as_array()?
        .iter()
        .map(to_line_string)
        .collect::<Option<Vec<_>>>()?
        .into_iter();
    let exterior = rings.next()?;
    Some(Polygon::new(exterior, rings.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAP_CENTER;
    use serde_json::json;

    fn feature(geometry: Value) -> Feature {
        Feature::from_value(json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": { "name": "Paddock" }
        }))
    }

    fn assert_close(actual: [f64; 2], expected: [f64; 2]) {
        assert!(
            (actual[0] - expected[0]).abs() < 1e-9 && (actual[1] - expected[1]).abs() < 1e-9,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_unit_square_center() {
        let square = feature(json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]
        }));
        assert_close(map_center(&square).unwrap(), [0.5, 0.5]);
    }

    #[test]
    fn test_center_is_lat_lng() {
        let paddock = feature(json!({
            "type": "Polygon",
            "coordinates": [[[150, -35], [151, -35], [151, -34], [150, -34], [150, -35]]]
        }));
        assert_close(map_center(&paddock).unwrap(), [-34.5, 150.5]);
    }

    #[test]
    fn test_point_center() {
        let point = feature(json!({ "type": "Point", "coordinates": [149.1, -35.3] }));
        assert_close(map_center(&point).unwrap(), [-35.3, 149.1]);
    }

    #[test]
    fn test_multipolygon_center() {
        let multi = feature(json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]],
                [[[2, 0], [3, 0], [3, 1], [2, 1], [2, 0]]]
            ]
        }));
        assert_close(map_center(&multi).unwrap(), [0.5, 1.5]);
    }

    #[test]
    fn test_fallback_center() {
        let config = MapConfig::default();
        let cases = [
            Feature::from_value(json!({ "properties": {} })),
            feature(json!({ "type": "GeometryCollection", "geometries": [] })),
            feature(json!({ "type": "Polygon", "coordinates": [] })),
            feature(json!({ "type": "Polygon", "coordinates": [[["a", "b"]]] })),
        ];

        for case in &cases {
            let view = PaddockMapView::for_feature(case, &config);
            assert_eq!(view.center, DEFAULT_MAP_CENTER);
        }
    }

    #[test]
    fn test_view_carries_map_config() {
        let square = feature(json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]
        }));
        let view = PaddockMapView::for_feature(&square, &MapConfig::default());

        assert_eq!(view.zoom, 12);
        assert_eq!(view.height, "400px");
        assert_eq!(view.style.color, "red");
        assert_eq!(view.style.fill_opacity, 0.25);
        assert_eq!(view.feature["geometry"]["type"], json!("Polygon"));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["style"]["fillColor"], json!("blue"));
        assert!(json["tileUrl"].as_str().unwrap().contains("openstreetmap"));
    }
}
