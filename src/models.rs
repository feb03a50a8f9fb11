//! Frontend Models
//!
//! Persisted task records and their in-memory wrappers.

use serde::{Deserialize, Serialize};

/// Session-local entry identifier. Never persisted.
pub type EntryId = u32;

/// Task record as stored: `{ "text": ..., "completed": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// A task as shown in the list, identified by its entry id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub task: Task,
}

/// Which entries are visible. Never affects stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl FilterMode {
    /// Filter buttons, in display order
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Completed, FilterMode::Incomplete];

    /// Identifier carried by the filter button (`data-filter`)
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Completed => "completed",
            FilterMode::Incomplete => "incomplete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(FilterMode::All),
            "completed" => Some(FilterMode::Completed),
            "incomplete" => Some(FilterMode::Incomplete),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Completed => "Completed",
            FilterMode::Incomplete => "Incomplete",
        }
    }

    pub fn shows(&self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Completed => task.completed,
            FilterMode::Incomplete => !task.completed,
        }
    }
}
