//! Filter Bar Component
//!
//! One button per filter mode, each carrying its identifier in `data-filter`.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;
use crate::models::FilterMode;

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_app_context();

    let on_click = move |ev: web_sys::MouseEvent| {
        let mode = ev
            .current_target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|button| button.get_attribute("data-filter"))
            .and_then(|raw| FilterMode::parse(&raw));
        match mode {
            Some(mode) => ctx.controller.update(|c| c.set_filter(mode)),
            None => log::warn!("[APP] filter button without a known data-filter"),
        }
    };

    view! {
        <div class="filter">
            {FilterMode::ALL.iter().map(|&mode| {
                let is_active = move || ctx.controller.with(|c| c.filter() == mode);
                view! {
                    <button
                        type="button"
                        data-filter=mode.as_str()
                        class=move || if is_active() { "filter-btn active" } else { "filter-btn" }
                        on:click=on_click
                    >
                        {mode.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
