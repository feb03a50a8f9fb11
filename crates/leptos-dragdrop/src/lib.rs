//! Leptos DragDrop Utilities
//!
//! Native HTML5 drag-and-drop for reorderable Leptos lists.
//! Entries tag themselves with `data-entry-id`; on every `dragover` the list
//! container measures its children and reports where the dragged entry lands.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::DragEvent;

/// Attribute carrying the entry id on each draggable child
pub const ENTRY_ID_ATTR: &str = "data-entry-id";

/// Class set on the entry currently being dragged
pub const DRAGGING_CLASS: &str = "dragging";

/// Vertical box of a rendered entry, in client coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryBounds {
    pub id: u32,
    pub top: f64,
    pub height: f64,
}

impl EntryBounds {
    pub fn new(id: u32, top: f64, height: f64) -> Self {
        Self { id, top, height }
    }

    /// Vertical midpoint of the box
    pub fn mid_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Entry the dragged one should be inserted before.
///
/// Among entries whose midpoint lies below the pointer (`offset < 0`), picks
/// the one with the largest offset, i.e. the nearest one. Ties keep the first
/// in iteration order. `None` means the pointer is below every entry and the
/// dragged entry belongs at the end of the list.
pub fn insertion_target<I>(pointer_y: f64, entries: I) -> Option<u32>
where
    I: IntoIterator<Item = EntryBounds>,
{
    entries
        .into_iter()
        .fold(None::<(f64, u32)>, |closest, entry| {
            let offset = pointer_y - entry.mid_y();
            if offset.is_nan() || offset >= 0.0 {
                return closest;
            }
            match closest {
                Some((best, _)) if offset <= best => closest,
                _ => Some((offset, entry.id)),
            }
        })
        .map(|(_, id)| id)
}

/// Measure the children of `container` that carry an entry id.
///
/// The child marked with [`DRAGGING_CLASS`] is skipped, as are children
/// without a parsable id.
pub fn measure_entries(container: &web_sys::Element) -> Vec<EntryBounds> {
    let children = container.children();
    let mut bounds = Vec::with_capacity(children.length() as usize);
    for i in 0..children.length() {
        let Some(child) = children.item(i) else { continue };
        if child.class_list().contains(DRAGGING_CLASS) {
            continue;
        }
        let Some(id) = child
            .get_attribute(ENTRY_ID_ATTR)
            .and_then(|raw| raw.parse::<u32>().ok())
        else {
            continue;
        };
        let rect = child.get_bounding_client_rect();
        bounds.push(EntryBounds::new(id, rect.top(), rect.height()));
    }
    bounds
}

/// Create dragstart handler for a draggable entry
///
/// Writes the id into the DataTransfer (Firefox will not start a drag
/// without data) and reports the start.
pub fn make_on_dragstart(entry_id: u32, on_start: Callback<u32>) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            dt.set_effect_allowed("move");
            let _ = dt.set_data("text/plain", &entry_id.to_string());
        }
        on_start.run(entry_id);
    }
}

/// Create dragover handler for the list container
///
/// Fires continuously while hovering. Reports the pointer's client Y and the
/// measured boxes of the container's children.
pub fn make_on_dragover(on_over: Callback<(f64, Vec<EntryBounds>)>) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        // Required to mark the container as a valid drop zone
        ev.prevent_default();
        let Some(container) = ev
            .current_target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        on_over.run((f64::from(ev.client_y()), measure_entries(&container)));
    }
}

/// Create drop handler for the list container
pub fn make_on_drop(on_drop: Callback<()>) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        on_drop.run(());
    }
}

/// Create dragend handler for a draggable entry
///
/// Fires on the source after `drop`, and also when the gesture ends outside
/// any drop zone.
pub fn make_on_dragend(on_end: Callback<()>) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| {
        on_end.run(());
    }
}
