//! App Configuration
//!
//! Defaults work out of the box. A page may override them with an inline
//! JSON block:
//!
//! ```html
//! <script type="application/json" id="task-list-config">
//!   { "storage_key": "my-tasks", "log_level": "debug" }
//! </script>
//! ```

use log::LevelFilter;
use serde::Deserialize;

use crate::error::{TaskError, TaskResult};

/// Id of the inline config element
pub const CONFIG_ELEMENT_ID: &str = "task-list-config";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// localStorage key holding the serialized list
    pub storage_key: String,
    /// One of off, error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: "tasks".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> TaskResult<Self> {
        let config: AppConfig =
            serde_json::from_str(raw).map_err(|e| TaskError::InvalidConfig(e.to_string()))?;
        if config.storage_key.trim().is_empty() {
            return Err(TaskError::InvalidConfig("storage_key must not be empty".to_string()));
        }
        if config.log_level.parse::<LevelFilter>().is_err() {
            return Err(TaskError::InvalidConfig(format!(
                "unknown log_level '{}'",
                config.log_level
            )));
        }
        Ok(config)
    }

    /// Read the inline config block, if the page has one
    pub fn from_page() -> TaskResult<Option<Self>> {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        raw.map(|raw| Self::from_json(&raw)).transpose()
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
