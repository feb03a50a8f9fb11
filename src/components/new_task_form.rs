//! New Task Form Component
//!
//! Single text input; submitting appends a task at the end of the list.

use leptos::prelude::*;

use crate::context::use_app_context;

/// Form for creating new tasks
#[component]
pub fn NewTaskForm() -> impl IntoView {
    let ctx = use_app_context();

    let (new_text, set_new_text) = signal(String::new());

    let add_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get_untracked();
        // Blank input is ignored and left in the field
        if ctx.run("add", |c| c.add_task(&text)).is_some() {
            set_new_text.set(String::new());
        }
    };

    view! {
        <form id="task-form" class="task-form" on:submit=add_task>
            <input
                id="task-input"
                type="text"
                placeholder="Add a new task..."
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
        </form>
    }
}
