// File picker checks and reading the selected file's text
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::config::ACCEPTED_MIME_TYPES;
use crate::console_log;
use crate::module_state::ModuleState;
use crate::notifications::{Notification, FILE_READ_FAILED, FILE_SELECTED, INVALID_FILE_TYPE, NO_FILE_SELECTED};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileSelectionError {
    #[error("No file selected")]
    NoFileSelected,
    #[error("Unsupported file type: {0:?}")]
    InvalidFileType(String),
}

impl FileSelectionError {
    pub fn notification(&self) -> Notification {
        match self {
            FileSelectionError::NoFileSelected => Notification::error(NO_FILE_SELECTED),
            FileSelectionError::InvalidFileType(_) => Notification::error(INVALID_FILE_TYPE),
        }
    }
}

/// Accept only a selected file with a JSON or GeoJSON MIME type.
pub fn check_file_selection(mime_type: Option<&str>) -> Result<(), FileSelectionError> {
    let mime_type = mime_type.ok_or(FileSelectionError::NoFileSelected)?;
    if ACCEPTED_MIME_TYPES.contains(&mime_type) {
        Ok(())
    } else {
        Err(FileSelectionError::InvalidFileType(mime_type.to_string()))
    }
}

fn reject(err: FileSelectionError) -> JsValue {
    ModuleState::with_mut(|state| state.session.notify(err.notification()));
    JsValue::from_str(&err.to_string())
}

/// Check, read and ingest a file from an `<input type="file">`.
///
/// Resolves with the grouped projects. Every outcome queues a toast; drain
/// them with `take_notifications`.
#[wasm_bindgen]
pub async fn upload_geojson_file(file: Option<web_sys::File>) -> Result<JsValue, JsValue> {
    let file = file.ok_or_else(|| reject(FileSelectionError::NoFileSelected))?;
    check_file_selection(Some(file.type_().as_str())).map_err(reject)?;

    console_log!("Reading {} ({} bytes)", file.name(), file.size());
    ModuleState::with_mut(|state| state.session.notify(Notification::success(FILE_SELECTED)));

    // The state lock is not held across this await
    let promise: js_sys::Promise = file.text();
    let text = match JsFuture::from(promise).await {
        Ok(value) => value.as_string(),
        Err(_) => None,
    };
    let text = match text {
        Some(text) => text,
        None => {
            ModuleState::with_mut(|state| state.session.notify(Notification::error(FILE_READ_FAILED)));
            return Err(JsValue::from_str(FILE_READ_FAILED));
        }
    };

    crate::ingest_geojson(&text)
}
