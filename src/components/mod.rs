//! UI Components
//!
//! Leptos components projecting the controller state.

mod new_task_form;
mod filter_bar;
mod task_list_view;
mod task_entry;

pub use new_task_form::NewTaskForm;
pub use filter_bar::FilterBar;
pub use task_list_view::TaskListView;
pub use task_entry::TaskEntry;
