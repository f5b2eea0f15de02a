//! Client configuration

use serde::{Deserialize, Serialize};

use crate::selection::StatusId;
use crate::ClientError;

/// Client configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Images per gallery page
    pub gallery_page_size: usize,
    /// Maximum length of an update description
    pub max_description_len: usize,
    /// Status assigned to a newly selected element when the project data
    /// has no current status for it
    pub fallback_status_id: StatusId,
    /// Logging level
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gallery_page_size: 8,
            max_description_len: 1000,
            fallback_status_id: 1,
            log_level: "info".into(),
        }
    }
}

impl ClientConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self, ClientError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ClientError::Config(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Save to file
    pub fn save(&self, path: &str) -> Result<(), ClientError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ClientError::Config(e.to_string()))
    }
}
