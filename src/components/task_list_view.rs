//! Task List View Component
//!
//! Renders every entry in list order and hosts drag-and-drop reordering.
//! The container handles dragover/drop; each entry handles its own
//! dragstart/dragend.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragover, make_on_drop, EntryBounds};

use crate::components::TaskEntry;
use crate::context::use_app_context;

#[component]
pub fn TaskListView() -> impl IntoView {
    let ctx = use_app_context();

    // Reflow on every dragover, but only notify when the order actually moved
    let on_over = Callback::new(move |(pointer_y, bounds): (f64, Vec<EntryBounds>)| {
        ctx.controller.maybe_update(|c| match c.drag_over(pointer_y, &bounds) {
            Ok(moved) => moved,
            Err(e) => {
                log::debug!("[DND] dragover ignored: {}", e);
                false
            }
        });
    });

    let on_drop = Callback::new(move |()| {
        ctx.run("drop", |c| c.drop_drag());
    });

    let entries = move || ctx.controller.with(|c| c.entries().to_vec());

    view! {
        <ul
            id="task-list"
            class="task-list"
            on:dragover=make_on_dragover(on_over)
            on:drop=make_on_drop(on_drop)
        >
            <For
                each=entries
                // Text and completion are part of the key so edits re-render the row
                key=|entry| (entry.id, entry.task.text.clone(), entry.task.completed)
                children=move |entry| view! { <TaskEntry entry=entry /> }
            />
        </ul>
    }
}
