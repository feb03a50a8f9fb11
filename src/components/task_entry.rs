//! Task Entry Component
//!
//! A single row: text plus Complete/Edit/Delete controls, or an inline
//! editor while in edit mode.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragend, make_on_dragstart};

use crate::context::use_app_context;
use crate::models::{Entry, EntryId};

/// A single task row in the list
#[component]
pub fn TaskEntry(entry: Entry) -> impl IntoView {
    let ctx = use_app_context();

    let id = entry.id;
    let completed = entry.task.completed;
    let text = entry.task.text;

    let is_visible = move || {
        ctx.controller
            .with(|c| c.get(id).is_some_and(|entry| c.is_visible(entry)))
    };
    let is_dragging = move || ctx.controller.with(|c| c.dragging() == Some(id));
    let is_editing = move || ctx.controller.with(|c| c.editing().is_some_and(|s| s.id == id));

    let on_start = Callback::new(move |id: EntryId| {
        ctx.run("dragstart", |c| c.begin_drag(id));
    });
    let on_end = Callback::new(move |()| {
        ctx.run("dragend", |c| c.end_drag());
    });

    view! {
        <li
            class="task-entry"
            class:completed=completed
            class:dragging=is_dragging
            data-entry-id=id.to_string()
            draggable=move || if is_editing() { "false" } else { "true" }
            style:display=move || if is_visible() { "" } else { "none" }
            on:dragstart=make_on_dragstart(id, on_start)
            on:dragend=make_on_dragend(on_end)
        >
            <Show
                when=is_editing
                fallback=move || {
                    let text = text.clone();
                    view! {
                        <span class="task-text">{text}</span>
                        <button class="complete-task" on:click=move |_| {
                            ctx.run("toggle", |c| c.toggle_complete(id));
                        }>"Complete"</button>
                        <button class="edit-task" on:click=move |_| {
                            ctx.run("edit", |c| c.begin_edit(id));
                        }>"Edit"</button>
                        <button class="delete-task" on:click=move |_| {
                            ctx.run("delete", |c| c.delete_task(id));
                        }>"Delete"</button>
                    }
                }
            >
                <TaskEditor />
            </Show>
        </li>
    }
}

/// Inline editor for the entry in edit mode
///
/// Keeps its own draft while typing and hands it to the controller on save.
/// Enter saves, Escape cancels.
#[component]
fn TaskEditor() -> impl IntoView {
    let ctx = use_app_context();

    let seed = ctx
        .controller
        .with_untracked(|c| c.editing().map(|s| s.draft.clone()))
        .unwrap_or_default();
    let (draft, set_draft) = signal(seed);

    let save = move || {
        let text = draft.get_untracked();
        ctx.run("edit commit", |c| {
            c.set_edit_draft(&text);
            c.commit_edit()
        });
    };
    let cancel = move || ctx.controller.update(|c| c.cancel_edit());

    view! {
        <input
            class="task-edit-input"
            type="text"
            prop:value=move || draft.get()
            on:input=move |ev| set_draft.set(event_target_value(&ev))
            on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                "Enter" => save(),
                "Escape" => cancel(),
                _ => {}
            }
        />
        <button class="save-edit" on:click=move |_| save()>"Save"</button>
        <button class="cancel-edit" on:click=move |_| cancel()>"Cancel"</button>
    }
}
