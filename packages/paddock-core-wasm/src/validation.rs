// Structural check of an uploaded GeoJSON document
use serde_json::Value;
use thiserror::Error;

use crate::models::{Feature, FeatureCollection};

const FEATURE_COLLECTION: &str = "FeatureCollection";

/// Why a parsed document is not a feature collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("missing \"type\" member")]
    MissingType,
    #[error("expected type \"FeatureCollection\", found {0}")]
    WrongType(String),
    #[error("missing \"features\" member")]
    MissingFeatures,
    #[error("\"features\" is not an array")]
    FeaturesNotArray,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid(FeatureCollection),
    Invalid(InvalidReason),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }
}

/// Check that `value` is `{ "type": "FeatureCollection", "features": [...] }`.
///
/// An empty `features` array is valid. Individual features are not checked
/// here; see `feature_filter`.
pub fn validate_feature_collection(value: &Value) -> Validation {
    match check_shape(value) {
        Ok(features) => Validation::Valid(FeatureCollection {
            features: features.iter().cloned().map(Feature::from_value).collect(),
        }),
        Err(reason) => Validation::Invalid(reason),
    }
}

pub fn is_valid_feature_collection(value: &Value) -> bool {
    check_shape(value).is_ok()
}

fn check_shape(value: &Value) -> Result<&Vec<Value>, InvalidReason> {
    let object = value.as_object().ok_or(InvalidReason::NotAnObject)?;

    match object.get("type") {
        None | Some(Value::Null) => return Err(InvalidReason::MissingType),
        Some(Value::String(tag)) if tag == FEATURE_COLLECTION => {}
        Some(other) => return Err(InvalidReason::WrongType(other.to_string())),
    }

    match object.get("features") {
        None | Some(Value::Null) => Err(InvalidReason::MissingFeatures),
        Some(Value::Array(features)) => Ok(features),
        Some(_) => Err(InvalidReason::FeaturesNotArray),
    }
}
