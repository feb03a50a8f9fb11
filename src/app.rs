//! Task List App
//!
//! Root component: restores the list from storage and lays out the form,
//! filter buttons, list and footer.

use leptos::prelude::*;

use crate::components::{FilterBar, NewTaskForm, TaskListView};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::controller::TaskListController;
use crate::storage::BrowserStorage;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // Storage is read once, here
    let controller = TaskListController::restore(BrowserStorage::new(config.storage_key));
    let ctx = AppContext::new(controller);
    provide_context(ctx);

    let summary = move || {
        let (total, completed) = ctx.controller.with(|c| c.counts());
        format!("{} tasks, {} completed", total, completed)
    };

    view! {
        <main class="app">
            <h1>"Task List"</h1>

            <NewTaskForm />

            <FilterBar />

            <TaskListView />

            <footer class="task-footer">
                <p class="task-count">{summary}</p>
                <Show when=move || ctx.controller.with(|c| !c.entries().is_empty())>
                    <button class="clear-tasks" on:click=move |_| ctx.controller.update(|c| c.clear())>
                        "Clear all"
                    </button>
                </Show>
            </footer>
        </main>
    }
}
