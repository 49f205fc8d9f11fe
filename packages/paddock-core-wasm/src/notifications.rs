// Toast messages shown by the front end
use serde::{Deserialize, Serialize};

pub const INVALID_GEOJSON_FORMAT: &str = "Invalid GeoJSON format";
pub const NO_FILE_SELECTED: &str = "No file selected. Please upload a valid GeoJSON file.";
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Please upload a valid GeoJSON file.";
pub const FILE_SELECTED: &str = "File selected successfully. Processing...";
pub const FILE_READ_FAILED: &str = "An error occurred while processing the file. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}
