// Configuration surface for the paddock pipeline and its presentation.
//
// Every fallback string lives here once; grouping, presentation and the
// map view read them from this module instead of repeating literals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label shown for a missing paddock name or owner.
pub const UNKNOWN_LABEL: &str = "Unknown";
/// Group key for features without a usable `Project__Name`.
pub const UNKNOWN_PROJECT_NAME: &str = "Unknown Projects";
/// Label shown for a single paddock whose `area_acres` is missing.
pub const UNKNOWN_AREA_LABEL: &str = "Unknown acres";
pub const AREA_UNIT: &str = "acres";
pub const AREA_DECIMALS: usize = 2;

// A ring needs more than this many positions to count as a paddock polygon
pub const MIN_RING_POSITIONS: usize = 4;

// Map defaults, [lat, lng]
pub const DEFAULT_MAP_CENTER: [f64; 2] = [-35.0, 150.0];
pub const DEFAULT_MAP_ZOOM: u8 = 12;
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_MAP_HEIGHT: &str = "400px";

pub const TOAST_AUTO_CLOSE_MS: u32 = 3000;

/// MIME types accepted from the file picker.
pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["application/json", "application/geo+json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid paddock configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FallbackLabels {
    pub unknown: String,
    pub unknown_project: String,
    pub unknown_area: String,
}

impl Default for FallbackLabels {
    fn default() -> Self {
        Self {
            unknown: UNKNOWN_LABEL.to_string(),
            unknown_project: UNKNOWN_PROJECT_NAME.to_string(),
            unknown_area: UNKNOWN_AREA_LABEL.to_string(),
        }
    }
}

// Leaflet path options for the paddock outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaddockStyle {
    pub color: String,
    pub weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

impl Default for PaddockStyle {
    fn default() -> Self {
        Self {
            color: "red".to_string(),
            weight: 1.0,
            fill_color: "blue".to_string(),
            fill_opacity: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub default_center: [f64; 2],
    pub zoom: u8,
    pub tile_url: String,
    pub height: String,
    pub style: PaddockStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_MAP_CENTER,
            zoom: DEFAULT_MAP_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            height: DEFAULT_MAP_HEIGHT.to_string(),
            style: PaddockStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaddockConfig {
    pub labels: FallbackLabels,
    pub map: MapConfig,
    pub area_decimals: usize,
    pub toast_auto_close_ms: u32,
}

impl Default for PaddockConfig {
    fn default() -> Self {
        Self {
            labels: FallbackLabels::default(),
            map: MapConfig::default(),
            area_decimals: AREA_DECIMALS,
            toast_auto_close_ms: TOAST_AUTO_CLOSE_MS,
        }
    }
}

impl PaddockConfig {
    /// Parse a partial JSON config; absent fields keep their defaults.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    // Format an acreage with the configured precision, e.g. "125.75 acres"
    pub fn format_acres(&self, acres: f64) -> String {
        format!("{:.*} {}", self.area_decimals, acres, AREA_UNIT)
    }
}
