use wasm_bindgen::prelude::*;
use serde::Serialize;

// Create a console module for logging
pub mod console;
// Fallback labels, map defaults and the runtime config
pub mod config;
// GeoJSON feature and grouping models
pub mod models;
// FeatureCollection shape check
pub mod validation;
// Paddock polygon filter
pub mod feature_filter;
// Project grouping and locale ordering
pub mod grouping;
// Per-project totals
pub mod summary;
// The ingestion pipeline and upload session
pub mod ingest;
// Toast messages
pub mod notifications;
// Map view model per paddock
pub mod map_view;
// Project and paddock cards
pub mod presentation;
// File picker checks and async file reading
pub mod file_input;
// Import our module state management
mod module_state;

use config::{ConfigError, PaddockConfig};
use module_state::{IngestStats, ModuleState};

pub use file_input::upload_geojson_file;
pub use ingest::{ingest, IngestionError, ProjectSession};
pub use models::{Feature, FeatureCollection, GroupedProjectFeatures};

// Enable better panic messages in console during development
#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

// Use the macro from our console module
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => (crate::console::log(&format!($($t)*)))
}

use std::sync::Once;
static INIT: Once = Once::new();

// This sets up the wasm_bindgen start functionality
#[wasm_bindgen(start)]
pub fn start() {
    INIT.call_once(|| {
        // Set the panic hook for better error messages
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        console_log!("Paddock core initialized");
    });
}

// Maps go out as plain JS objects rather than `Map`s
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

/// Replace the runtime configuration; fields left out keep their defaults.
#[wasm_bindgen]
pub fn configure(config: JsValue) -> Result<(), JsValue> {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&ConfigError::Invalid(e.to_string()).to_string()))?;
    let config = PaddockConfig::from_json_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    ModuleState::with_mut(|state| state.config = config);
    Ok(())
}

#[wasm_bindgen]
pub fn get_config() -> Result<JsValue, JsValue> {
    let config = ModuleState::with(|state| state.config.clone());
    to_js(&config)
}

/// Ingest raw GeoJSON text and make it the current set of projects.
///
/// On failure the previous projects stay loaded and an "Invalid GeoJSON
/// format" toast is queued.
#[wasm_bindgen]
pub fn ingest_geojson(raw: &str) -> Result<JsValue, JsValue> {
    let result = ModuleState::with_mut(|state| {
        let config = state.config.clone();
        let result = state.session.handle_upload(raw, &config);
        state.record_upload(result.is_ok());
        result
    });

    match result {
        Ok(grouped) => to_js(grouped.as_ref()),
        Err(err) => Err(JsValue::from_str(&err.to_string())),
    }
}

#[wasm_bindgen]
pub fn is_valid_feature_collection_js(raw: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(|value| validation::is_valid_feature_collection(&value))
        .unwrap_or(false)
}

// Current grouped projects, or null when nothing is loaded
#[wasm_bindgen]
pub fn get_grouped_projects() -> Result<JsValue, JsValue> {
    match ModuleState::with(|state| state.session.current()) {
        Some(grouped) => to_js(grouped.as_ref()),
        None => Ok(JsValue::NULL),
    }
}

#[wasm_bindgen]
pub fn has_projects() -> bool {
    ModuleState::with(|state| state.session.current().is_some())
}

#[wasm_bindgen]
pub fn get_project_summaries() -> Result<JsValue, JsValue> {
    let summaries = ModuleState::with(|state| state.session.current())
        .map(|grouped| summary::summarize_projects(&grouped))
        .unwrap_or_default();
    to_js(&summaries)
}

#[wasm_bindgen]
pub fn get_project_cards() -> Result<JsValue, JsValue> {
    let (grouped, config) = ModuleState::with(|state| (state.session.current(), state.config.clone()));
    let cards = grouped
        .map(|grouped| presentation::build_project_cards(&grouped, &config))
        .unwrap_or_default();
    to_js(&cards)
}

#[wasm_bindgen]
pub fn get_paddock_map_view(project_name: &str, index: usize) -> Result<JsValue, JsValue> {
    let (grouped, config) = ModuleState::with(|state| (state.session.current(), state.config.clone()));
    let grouped = grouped.ok_or_else(|| JsValue::from_str("No GeoJSON loaded"))?;
    let feature = grouped
        .get(project_name)
        .and_then(|features| features.get(index))
        .ok_or_else(|| JsValue::from_str(&format!("No paddock {} in project {:?}", index, project_name)))?;
    to_js(&map_view::PaddockMapView::for_feature(feature, &config.map))
}

// Drain queued toasts
#[wasm_bindgen]
pub fn take_notifications() -> Result<JsValue, JsValue> {
    let notifications = ModuleState::with_mut(|state| state.session.take_notifications());
    to_js(&notifications)
}

#[wasm_bindgen]
pub fn clear_projects() -> bool {
    ModuleState::with_mut(|state| state.reset());
    true
}

#[wasm_bindgen]
pub fn get_ingest_stats() -> Result<JsValue, JsValue> {
    let stats: IngestStats = ModuleState::with(|state| state.get_stats());
    to_js(&stats)
}
