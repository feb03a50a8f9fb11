//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::controller::TaskListController;
use crate::error::TaskResult;
use crate::storage::BrowserStorage;

pub type Controller = TaskListController<BrowserStorage>;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The task list and its UI state. Components read it with `with`.
    pub controller: RwSignal<Controller>,
}

impl AppContext {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller: RwSignal::new(controller),
        }
    }

    /// Run a fallible controller operation, logging failures.
    ///
    /// Failures are expected user-level no-ops (empty input, vanished entry)
    /// so they are only logged at debug.
    pub fn run<T>(&self, action: &str, op: impl FnOnce(&mut Controller) -> TaskResult<T>) -> Option<T> {
        match self.controller.try_update(op)? {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("[APP] {} ignored: {}", action, e);
                None
            }
        }
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
