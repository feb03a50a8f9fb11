//! Error Types
//!
//! Every failure here degrades to a no-op or an empty list; callers log and
//! move on rather than surfacing messages to the user.

use thiserror::Error;

use crate::models::EntryId;

/// Common result type for task list operations
pub type TaskResult<T> = Result<T, TaskError>;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Submitted or edited text is empty after trimming
    #[error("task text is empty")]
    EmptyInput,

    #[error("persisted task list is corrupt: {0}")]
    CorruptPersistedState(#[source] serde_json::Error),

    #[error("failed to encode task list: {0}")]
    Encode(#[source] serde_json::Error),

    /// A drop arrived for an entry that is no longer in the list
    #[error("dragged entry #{0} is no longer in the list")]
    MissingDragTarget(EntryId),

    #[error("entry #{0} is no longer in the list")]
    MissingEntry(EntryId),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
