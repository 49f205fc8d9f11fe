// This is the models module containing the GeoJSON shapes the pipeline works on
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Paddock identifier as found in `properties.id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaddockId {
    Text(String),
    Number(serde_json::Number),
}

impl std::fmt::Display for PaddockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaddockId::Text(s) => write!(f, "{}", s),
            PaddockId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// The property bag of a paddock feature.
///
/// The keys the pipeline reads are typed members; everything else is kept in
/// `extra` so a feature serializes back to the shape it was uploaded in. A
/// known key holding an unexpected JSON type stays in `extra` instead of
/// failing the whole feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct PaddockProperties {
    #[serde(rename = "Project__Name", skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_acres: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PaddockId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaddockProperties {
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let project_name = take_label(&mut map, "Project__Name");
        let name = take_label(&mut map, "name");
        let owner = take_label(&mut map, "owner");
        let area_acres = take_number(&mut map, "area_acres");
        let id = take_id(&mut map, "id");

        Self {
            project_name,
            name,
            owner,
            area_acres,
            id,
            extra: map,
        }
    }
}

impl From<Value> for PaddockProperties {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !matches!(map.get(key), Some(Value::String(_))) {
        return None;
    }
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

// Strings as-is; truthy numbers and `true` in their JS string form
fn take_label(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    let label = match map.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_label(n)?,
        Value::Bool(true) => "true".to_string(),
        _ => return None,
    };
    map.remove(key);
    Some(label)
}

fn number_label(n: &serde_json::Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    n.as_f64().filter(|f| *f != 0.0).map(|f| f.to_string())
}

fn take_number(map: &mut Map<String, Value>, key: &str) -> Option<f64> {
    let number = map.get(key).and_then(Value::as_f64)?;
    map.remove(key);
    Some(number)
}

fn take_id(map: &mut Map<String, Value>, key: &str) -> Option<PaddockId> {
    match map.get(key) {
        Some(Value::String(_)) | Some(Value::Number(_)) => {}
        _ => return None,
    }
    match map.remove(key) {
        Some(Value::String(s)) => Some(PaddockId::Text(s)),
        Some(Value::Number(n)) => Some(PaddockId::Number(n)),
        _ => None,
    }
}

// Geometry part of a feature; coordinates stay raw since their nesting depends on the type
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Geometry {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub coordinates: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Geometry {
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let r#type = take_string(&mut map, "type");
        let coordinates = map.remove("coordinates").unwrap_or(Value::Null);
        Self {
            r#type,
            coordinates,
            extra: map,
        }
    }

    pub fn is_type(&self, tag: &str) -> bool {
        self.r#type.as_deref() == Some(tag)
    }
}

/// One GeoJSON feature, i.e. one paddock.
///
/// Built leniently from any JSON value: a `null`, scalar or array entry in a
/// collection becomes a feature with neither geometry nor properties, which
/// the feature filter then drops.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub struct Feature {
    pub id: Option<Value>,
    pub geometry: Option<Geometry>,
    pub properties: Option<PaddockProperties>,
    pub extra: Map<String, Value>,
}

impl Feature {
    pub fn from_value(value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            _ => return Self::default(),
        };

        // Only objects count as present; `null` or a scalar is treated as absent
        let geometry = match map.remove("geometry") {
            Some(Value::Object(g)) => Some(Geometry::from_map(g)),
            _ => None,
        };
        let properties = match map.remove("properties") {
            Some(Value::Object(p)) => Some(PaddockProperties::from_map(p)),
            _ => None,
        };
        let id = map.remove("id").filter(|v| !v.is_null());
        map.remove("type");

        Self {
            id,
            geometry,
            properties,
            extra: map,
        }
    }

    /// Non-empty `Project__Name`, if any.
    pub fn project_name(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.project_name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn area_acres(&self) -> Option<f64> {
        self.properties.as_ref().and_then(|p| p.area_acres)
    }

    pub fn geometry_type(&self) -> Option<&str> {
        self.geometry.as_ref().and_then(|g| g.r#type.as_deref())
    }

    // First ring of a polygon's coordinates, if it is an array
    pub fn exterior_ring(&self) -> Option<&Vec<Value>> {
        self.geometry
            .as_ref()?
            .coordinates
            .as_array()?
            .first()?
            .as_array()
    }

    pub fn to_json_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<Value> for Feature {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "Feature")?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        map.serialize_entry("geometry", &self.geometry)?;
        map.serialize_entry("properties", &self.properties)?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A validated `{ "type": "FeatureCollection", "features": [...] }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Features grouped by project name.
///
/// Produced once per ingestion and never mutated afterwards. Keys are unique
/// and iterate in locale order; each group keeps the source order of its
/// features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedProjectFeatures {
    groups: Vec<(String, Vec<Feature>)>,
}

impl GroupedProjectFeatures {
    // Caller guarantees unique keys already in display order
    pub(crate) fn from_sorted(groups: Vec<(String, Vec<Feature>)>) -> Self {
        Self { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Feature])> {
        self.groups
            .iter()
            .map(|(name, features)| (name.as_str(), features.as_slice()))
    }

    pub fn get(&self, project_name: &str) -> Option<&[Feature]> {
        self.groups
            .iter()
            .find(|(name, _)| name == project_name)
            .map(|(_, features)| features.as_slice())
    }

    pub fn project_names(&self) -> Vec<&str> {
        self.groups.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of features across all groups.
    pub fn feature_count(&self) -> usize {
        self.groups.iter().map(|(_, features)| features.len()).sum()
    }

    pub fn into_inner(self) -> Vec<(String, Vec<Feature>)> {
        self.groups
    }
}

impl Serialize for GroupedProjectFeatures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (name, features) in &self.groups {
            map.serialize_entry(name, features)?;
        }
        map.end()
    }
}
