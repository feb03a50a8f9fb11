//! Task Storage
//!
//! The whole list lives under a single key as a JSON array of
//! `{ text, completed }` records, in list order. Every save overwrites it.

use crate::error::{TaskError, TaskResult};
use crate::models::Task;

/// Key-value slot holding the serialized list
pub trait TaskStore {
    /// Raw stored value, `None` if nothing was ever saved
    fn load(&self) -> TaskResult<Option<String>>;

    /// Overwrite the stored value
    fn save(&mut self, raw: &str) -> TaskResult<()>;
}

pub fn encode_tasks<'a, I>(tasks: I) -> TaskResult<String>
where
    I: IntoIterator<Item = &'a Task>,
{
    let tasks: Vec<&Task> = tasks.into_iter().collect();
    serde_json::to_string(&tasks).map_err(TaskError::Encode)
}

/// A stored `null` decodes as an empty list
pub fn decode_tasks(raw: &str) -> TaskResult<Vec<Task>> {
    serde_json::from_str::<Option<Vec<Task>>>(raw)
        .map(Option::unwrap_or_default)
        .map_err(TaskError::CorruptPersistedState)
}

/// `window.localStorage`, looked up on every access
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    key: String,
}

impl BrowserStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> TaskResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| TaskError::StorageUnavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| TaskError::StorageUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| TaskError::StorageUnavailable("localStorage disabled".to_string()))
    }
}

impl TaskStore for BrowserStorage {
    fn load(&self) -> TaskResult<Option<String>> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| TaskError::StorageUnavailable(format!("{:?}", e)))
    }

    fn save(&mut self, raw: &str) -> TaskResult<()> {
        Self::storage()?
            .set_item(&self.key, raw)
            .map_err(|e| TaskError::StorageUnavailable(format!("{:?}", e)))
    }
}

/// In-memory slot for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub value: Option<String>,
    pub saves: usize,
    pub fail_writes: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_value(raw: &str) -> Self {
        Self {
            value: Some(raw.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl TaskStore for MemoryStore {
    fn load(&self) -> TaskResult<Option<String>> {
        Ok(self.value.clone())
    }

    fn save(&mut self, raw: &str) -> TaskResult<()> {
        if self.fail_writes {
            return Err(TaskError::StorageUnavailable("quota exceeded".to_string()));
        }
        self.value = Some(raw.to_string());
        self.saves += 1;
        Ok(())
    }
}
