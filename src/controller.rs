//! Task List Controller
//!
//! Owns the ordered list of entries and is the only source of truth for it.
//! The view is a projection of this state; storage is written from it after
//! every mutation through [`TaskListController::mutated`].

use leptos_dragdrop::{insertion_target, EntryBounds};

use crate::error::{TaskError, TaskResult};
use crate::models::{Entry, EntryId, FilterMode, Task};
use crate::storage::{decode_tasks, encode_tasks, TaskStore};

/// Inline edit in progress for one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: EntryId,
    pub draft: String,
}

pub struct TaskListController<S: TaskStore> {
    entries: Vec<Entry>,
    next_id: EntryId,
    filter: FilterMode,
    editing: Option<EditSession>,
    /// Entry being dragged; excluded from insertion-target computation
    dragging: Option<EntryId>,
    store: S,
}

impl<S: TaskStore> TaskListController<S> {
    /// Build the list from whatever `store` holds.
    ///
    /// Missing data gives an empty list. Corrupt data or an unreadable store
    /// is logged and also gives an empty list; the stored value is left as is
    /// until the next mutation overwrites it.
    pub fn restore(store: S) -> Self {
        let loaded = store
            .load()
            .and_then(|raw| raw.map(|raw| decode_tasks(&raw)).transpose());
        let tasks = match loaded {
            Ok(tasks) => tasks.unwrap_or_default(),
            Err(e) => {
                log::warn!("[STORE] starting with an empty list: {}", e);
                Vec::new()
            }
        };

        let mut controller = Self {
            entries: Vec::with_capacity(tasks.len()),
            next_id: 1,
            filter: FilterMode::All,
            editing: None,
            dragging: None,
            store,
        };
        for task in tasks {
            if task.text.trim().is_empty() {
                log::warn!("[STORE] skipping stored task with blank text");
                continue;
            }
            controller.push(task);
        }
        log::info!("[STORE] restored {} tasks", controller.entries.len());
        controller
    }

    fn push(&mut self, task: Task) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry { id, task });
        id
    }

    fn position(&self, id: EntryId) -> TaskResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(TaskError::MissingEntry(id))
    }

    /// All entries in list order, visible or not
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Ordered records as they are persisted
    pub fn tasks(&self) -> Vec<Task> {
        self.entries.iter().map(|entry| entry.task.clone()).collect()
    }

    /// `(total, completed)`
    pub fn counts(&self) -> (usize, usize) {
        let completed = self.entries.iter().filter(|e| e.task.completed).count();
        (self.entries.len(), completed)
    }

    // ========================
    // Mutations
    // ========================

    /// Append a new incomplete task. Whitespace-only text is rejected.
    pub fn add_task(&mut self, text: &str) -> TaskResult<EntryId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyInput);
        }
        let id = self.push(Task::new(text));
        log::debug!("[TASKS] added #{}", id);
        self.mutated();
        Ok(id)
    }

    /// Flip completion. Returns the new state.
    pub fn toggle_complete(&mut self, id: EntryId) -> TaskResult<bool> {
        let index = self.position(id)?;
        let task = &mut self.entries[index].task;
        task.completed = !task.completed;
        let completed = task.completed;
        self.mutated();
        Ok(completed)
    }

    /// Remove an entry for good. Returns the removed task.
    pub fn delete_task(&mut self, id: EntryId) -> TaskResult<Task> {
        let index = self.position(id)?;
        let entry = self.entries.remove(index);
        if self.editing.as_ref().is_some_and(|s| s.id == id) {
            self.editing = None;
        }
        log::debug!("[TASKS] deleted #{}", id);
        self.mutated();
        Ok(entry.task)
    }

    /// Remove every entry and persist the empty list
    pub fn clear(&mut self) {
        self.entries.clear();
        self.editing = None;
        self.dragging = None;
        self.mutated();
    }

    // ========================
    // Edit Mode
    // ========================

    /// Enter edit mode for `id`, seeding the draft from its stored text.
    /// Replaces any other edit in progress.
    pub fn begin_edit(&mut self, id: EntryId) -> TaskResult<()> {
        let index = self.position(id)?;
        self.editing = Some(EditSession {
            id,
            draft: self.entries[index].task.text.clone(),
        });
        Ok(())
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn set_edit_draft(&mut self, text: &str) {
        if let Some(session) = self.editing.as_mut() {
            session.draft = text.to_string();
        }
    }

    /// Apply the draft and leave edit mode.
    ///
    /// An empty draft leaves the entry unchanged and reports `EmptyInput`.
    /// Without an active edit this does nothing.
    pub fn commit_edit(&mut self) -> TaskResult<()> {
        let Some(session) = self.editing.take() else {
            return Ok(());
        };
        let text = session.draft.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyInput);
        }
        let index = self.position(session.id)?;
        if self.entries[index].task.text != text {
            self.entries[index].task.text = text.to_string();
            self.mutated();
        }
        Ok(())
    }

    /// Leave edit mode without touching the entry
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // ========================
    // Filter
    // ========================

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    pub fn is_visible(&self, entry: &Entry) -> bool {
        self.filter.shows(&entry.task)
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().filter(move |entry| self.is_visible(entry))
    }

    // ========================
    // Drag Reorder
    // ========================

    /// idle -> dragging
    pub fn begin_drag(&mut self, id: EntryId) -> TaskResult<()> {
        self.position(id)?;
        log::debug!("[DND] drag start #{}", id);
        self.dragging = Some(id);
        Ok(())
    }

    pub fn dragging(&self) -> Option<EntryId> {
        self.dragging
    }

    /// Move the dragging entry in front of the nearest entry whose midpoint
    /// lies below `pointer_y`, or to the end if there is none.
    ///
    /// Returns whether the order changed. Not persisted until the drop.
    pub fn drag_over(&mut self, pointer_y: f64, bounds: &[EntryBounds]) -> TaskResult<bool> {
        let Some(dragged) = self.dragging else {
            return Ok(false);
        };
        if self.get(dragged).is_none() {
            return Err(TaskError::MissingDragTarget(dragged));
        }
        let target = insertion_target(
            pointer_y,
            bounds.iter().copied().filter(|b| b.id != dragged),
        );
        self.move_before(dragged, target)
    }

    /// Move `id` to just before `target`, or to the end when `target` is None.
    ///
    /// Returns whether the order changed.
    pub fn move_before(&mut self, id: EntryId, target: Option<EntryId>) -> TaskResult<bool> {
        let from = self.position(id)?;
        if target == Some(id) {
            return Ok(false);
        }
        if let Some(target) = target {
            self.position(target)?;
        }
        let entry = self.entries.remove(from);
        let to = match target {
            Some(target) => self
                .entries
                .iter()
                .position(|e| e.id == target)
                .unwrap_or(self.entries.len()),
            None => self.entries.len(),
        };
        self.entries.insert(to, entry);
        Ok(to != from)
    }

    /// dragging -> idle, persisting the new order.
    ///
    /// Idle is a no-op. If the dragged entry vanished meanwhile the marker
    /// is cleared and `MissingDragTarget` reported.
    pub fn drop_drag(&mut self) -> TaskResult<()> {
        let Some(dragged) = self.dragging.take() else {
            return Ok(());
        };
        if self.get(dragged).is_none() {
            return Err(TaskError::MissingDragTarget(dragged));
        }
        log::debug!("[DND] dropped #{}", dragged);
        self.mutated();
        Ok(())
    }

    /// Gesture over, wherever it ended. Same as a drop if still dragging,
    /// since the list was already reordered live.
    pub fn end_drag(&mut self) -> TaskResult<()> {
        self.drop_drag()
    }

    // ========================
    // Persistence
    // ========================

    /// Overwrite the stored list with the current order
    pub fn persist(&mut self) -> TaskResult<()> {
        let raw = encode_tasks(self.entries.iter().map(|entry| &entry.task))?;
        self.store.save(&raw)
    }

    /// Called after every mutation. A failed write keeps the in-memory change.
    fn mutated(&mut self) {
        if let Err(e) = self.persist() {
            log::warn!("[STORE] failed to save tasks: {}", e);
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn controller_with(texts: &[&str]) -> TaskListController<MemoryStore> {
        let mut c = TaskListController::restore(MemoryStore::default());
        for text in texts {
            c.add_task(text).unwrap();
        }
        c
    }

    fn texts<S: TaskStore>(c: &TaskListController<S>) -> Vec<String> {
        c.entries().iter().map(|e| e.task.text.clone()).collect()
    }

    fn id_of<S: TaskStore>(c: &TaskListController<S>, text: &str) -> EntryId {
        c.entries().iter().find(|e| e.task.text == text).unwrap().id
    }

    fn reopen(c: &TaskListController<MemoryStore>) -> TaskListController<MemoryStore> {
        let raw = c.store().value.clone().unwrap();
        TaskListController::restore(MemoryStore::with_value(&raw))
    }

    /// Boxes 20px tall, stacked in current list order starting at y=0
    fn layout<S: TaskStore>(c: &TaskListController<S>) -> Vec<EntryBounds> {
        c.entries()
            .iter()
            .enumerate()
            .map(|(i, e)| EntryBounds::new(e.id, i as f64 * 20.0, 20.0))
            .collect()
    }

    #[test]
    fn test_restore_missing_is_empty() {
        let c = TaskListController::restore(MemoryStore::default());
        assert!(c.entries().is_empty());
        assert_eq!(c.store().saves, 0);
    }

    #[test]
    fn test_restore_keeps_order_and_completion() {
        let store = MemoryStore::with_value(
            r#"[{"text":"a","completed":true},{"text":"b","completed":false},{"text":"c"}]"#,
        );
        let c = TaskListController::restore(store);
        assert_eq!(texts(&c), vec!["a", "b", "c"]);
        let flags: Vec<bool> = c.entries().iter().map(|e| e.task.completed).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn test_restore_corrupt_falls_back_to_empty() {
        let c = TaskListController::restore(MemoryStore::with_value("{oops"));
        assert!(c.entries().is_empty());
        // left untouched until the next write
        assert_eq!(c.store().value.as_deref(), Some("{oops"));
    }

    #[test]
    fn test_restore_skips_blank_text() {
        let store = MemoryStore::with_value(r#"[{"text":"  ","completed":false},{"text":"x","completed":false}]"#);
        let c = TaskListController::restore(store);
        assert_eq!(texts(&c), vec!["x"]);
    }

    #[test]
    fn test_add_trims_and_persists() {
        let mut c = controller_with(&[]);
        let id = c.add_task("  Buy milk  ").unwrap();
        assert_eq!(c.get(id).unwrap().task, Task::new("Buy milk"));
        assert_eq!(
            c.store().value.as_deref(),
            Some(r#"[{"text":"Buy milk","completed":false}]"#)
        );
    }

    #[test]
    fn test_add_rejects_empty() {
        let mut c = controller_with(&["a"]);
        let saves = c.store().saves;
        assert!(matches!(c.add_task(""), Err(TaskError::EmptyInput)));
        assert!(matches!(c.add_task("   "), Err(TaskError::EmptyInput)));
        assert_eq!(texts(&c), vec!["a"]);
        assert_eq!(c.store().saves, saves);
    }

    #[test]
    fn test_entry_ids_are_not_reused() {
        let mut c = controller_with(&["a"]);
        let a = id_of(&c, "a");
        c.delete_task(a).unwrap();
        let b = c.add_task("b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_delete_preserves_order_of_rest() {
        let mut c = controller_with(&["a", "b", "c", "d"]);
        let removed = c.delete_task(id_of(&c, "b")).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(texts(&c), vec!["a", "c", "d"]);
        assert_eq!(texts(&reopen(&c)), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_delete_missing_entry() {
        let mut c = controller_with(&["a"]);
        assert!(matches!(c.delete_task(99), Err(TaskError::MissingEntry(99))));
        assert_eq!(texts(&c), vec!["a"]);
    }

    #[test]
    fn test_toggle_twice_restores_state_and_visibility() {
        let mut c = controller_with(&["a", "b"]);
        let a = id_of(&c, "a");

        c.set_filter(FilterMode::Incomplete);
        let visible_before: Vec<EntryId> = c.visible_entries().map(|e| e.id).collect();

        assert!(c.toggle_complete(a).unwrap());
        assert!(!c.is_visible(c.get(a).unwrap()));
        assert!(!c.toggle_complete(a).unwrap());

        let visible_after: Vec<EntryId> = c.visible_entries().map(|e| e.id).collect();
        assert_eq!(visible_before, visible_after);
        assert!(!c.get(a).unwrap().task.completed);

        c.set_filter(FilterMode::Completed);
        assert_eq!(c.visible_entries().count(), 0);
    }

    #[test]
    fn test_filter_is_non_destructive() {
        let mut c = controller_with(&["a", "b", "c"]);
        c.toggle_complete(id_of(&c, "b")).unwrap();
        let tasks = c.tasks();
        let saves = c.store().saves;

        for mode in FilterMode::ALL {
            c.set_filter(mode);
            c.set_filter(FilterMode::All);
            assert_eq!(c.visible_entries().count(), 3);
            assert_eq!(c.tasks(), tasks);
        }

        c.set_filter(FilterMode::Completed);
        let shown: Vec<&str> = c.visible_entries().map(|e| e.task.text.as_str()).collect();
        assert_eq!(shown, vec!["b"]);
        // filtering never writes
        assert_eq!(c.store().saves, saves);
    }

    #[test]
    fn test_edit_seeds_from_stored_text() {
        let mut c = controller_with(&["Buy milk"]);
        let id = id_of(&c, "Buy milk");
        c.toggle_complete(id).unwrap();
        c.begin_edit(id).unwrap();
        assert_eq!(
            c.editing(),
            Some(&EditSession { id, draft: "Buy milk".to_string() })
        );
    }

    #[test]
    fn test_edit_commit_replaces_text() {
        let mut c = controller_with(&["a", "b"]);
        let b = id_of(&c, "b");
        c.begin_edit(b).unwrap();
        c.set_edit_draft("  bee ");
        c.commit_edit().unwrap();
        assert_eq!(texts(&c), vec!["a", "bee"]);
        assert!(c.editing().is_none());
        assert_eq!(texts(&reopen(&c)), vec!["a", "bee"]);
    }

    #[test]
    fn test_edit_cancel_and_empty_leave_text_unchanged() {
        let mut c = controller_with(&["a"]);
        let a = id_of(&c, "a");

        c.begin_edit(a).unwrap();
        c.set_edit_draft("changed");
        c.cancel_edit();
        assert_eq!(texts(&c), vec!["a"]);

        c.begin_edit(a).unwrap();
        c.set_edit_draft("   ");
        assert!(matches!(c.commit_edit(), Err(TaskError::EmptyInput)));
        assert_eq!(texts(&c), vec!["a"]);
        assert!(c.editing().is_none());
    }

    #[test]
    fn test_edit_of_deleted_entry() {
        let mut c = controller_with(&["a", "b"]);
        let a = id_of(&c, "a");
        c.begin_edit(a).unwrap();
        c.delete_task(a).unwrap();
        assert!(c.editing().is_none());
        assert!(c.commit_edit().is_ok());
        assert_eq!(texts(&c), vec!["b"]);
    }

    #[test]
    fn test_reorder_targets_nearest_midpoint_below_pointer() {
        let mut c = controller_with(&["a", "b", "c", "d"]);
        let d = id_of(&c, "d");
        // a, b, c at midpoints 10, 30, 50; d is being dragged
        let bounds = layout(&c);
        assert_eq!(bounds[1].mid_y(), 30.0);

        c.begin_drag(d).unwrap();
        assert!(c.drag_over(25.0, &bounds).unwrap());
        assert_eq!(texts(&c), vec!["a", "d", "b", "c"]);

        c.drop_drag().unwrap();
        assert_eq!(c.dragging(), None);
        assert_eq!(texts(&reopen(&c)), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_reorder_below_all_appends() {
        let mut c = controller_with(&["a", "b", "c"]);
        let a = id_of(&c, "a");
        c.begin_drag(a).unwrap();
        let bounds = layout(&c);
        c.drag_over(500.0, &bounds).unwrap();
        assert_eq!(texts(&c), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_dragged_entry_is_excluded_from_targets() {
        let mut c = controller_with(&["a", "b", "c"]);
        let b = id_of(&c, "b");
        c.begin_drag(b).unwrap();
        // pointer just above b's own midpoint: b must not target itself
        let bounds = layout(&c);
        assert!(!c.drag_over(29.0, &bounds).unwrap());
        assert_eq!(texts(&c), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_drag_over_is_live_and_not_persisted_until_drop() {
        let mut c = controller_with(&["a", "b", "c"]);
        let saves = c.store().saves;
        let c_id = id_of(&c, "c");
        c.begin_drag(c_id).unwrap();
        c.drag_over(0.0, &layout(&c)).unwrap();
        assert_eq!(texts(&c), vec!["c", "a", "b"]);
        assert_eq!(c.store().saves, saves);

        c.end_drag().unwrap();
        assert_eq!(c.store().saves, saves + 1);
        // dragend after drop is idle
        c.end_drag().unwrap();
        assert_eq!(c.store().saves, saves + 1);
    }

    #[test]
    fn test_drag_over_when_idle_is_noop() {
        let mut c = controller_with(&["a", "b"]);
        assert!(!c.drag_over(0.0, &layout(&c)).unwrap());
        assert!(c.drop_drag().is_ok());
        assert_eq!(texts(&c), vec!["a", "b"]);
    }

    #[test]
    fn test_drop_of_vanished_entry() {
        let mut c = controller_with(&["a", "b"]);
        let a = id_of(&c, "a");
        c.begin_drag(a).unwrap();
        c.delete_task(a).unwrap();

        assert!(matches!(c.drag_over(0.0, &[]), Err(TaskError::MissingDragTarget(id)) if id == a));
        assert!(matches!(c.drop_drag(), Err(TaskError::MissingDragTarget(id)) if id == a));
        assert_eq!(c.dragging(), None);
        assert_eq!(texts(&c), vec!["b"]);
    }

    #[test]
    fn test_begin_drag_unknown_entry() {
        let mut c = controller_with(&["a"]);
        assert!(matches!(c.begin_drag(42), Err(TaskError::MissingEntry(42))));
        assert_eq!(c.dragging(), None);
    }

    #[test]
    fn test_move_before() {
        let mut c = controller_with(&["a", "b", "c"]);
        let (a, b, cc) = (id_of(&c, "a"), id_of(&c, "b"), id_of(&c, "c"));
        assert!(c.move_before(cc, Some(a)).unwrap());
        assert_eq!(texts(&c), vec!["c", "a", "b"]);
        assert!(!c.move_before(a, Some(b)).unwrap());
        assert!(!c.move_before(b, None).unwrap());
        assert!(!c.move_before(b, Some(b)).unwrap());
        assert!(matches!(c.move_before(a, Some(99)), Err(TaskError::MissingEntry(99))));
        assert_eq!(texts(&c), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_round_trip_after_mixed_operations() {
        let mut c = controller_with(&["one", "two", "three", "four"]);
        c.toggle_complete(id_of(&c, "two")).unwrap();
        c.begin_edit(id_of(&c, "three")).unwrap();
        c.set_edit_draft("THREE");
        c.commit_edit().unwrap();
        c.delete_task(id_of(&c, "one")).unwrap();
        let four = id_of(&c, "four");
        c.begin_drag(four).unwrap();
        c.drag_over(0.0, &layout(&c)).unwrap();
        c.drop_drag().unwrap();

        let restored = reopen(&c);
        assert_eq!(restored.tasks(), c.tasks());
        assert_eq!(
            restored.tasks(),
            vec![
                Task::new("four"),
                Task { text: "two".to_string(), completed: true },
                Task::new("THREE"),
            ]
        );
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut c = controller_with(&["a"]);
        let before = c.store().value.clone();
        let mut broken = TaskListController::restore(MemoryStore {
            value: before.clone(),
            fail_writes: true,
            ..Default::default()
        });
        broken.add_task("b").unwrap();
        assert_eq!(texts(&broken), vec!["a", "b"]);
        assert_eq!(broken.store().value, before);

        c.clear();
        assert!(c.entries().is_empty());
        assert_eq!(c.store().value.as_deref(), Some("[]"));
    }

    #[test]
    fn test_counts() {
        let mut c = controller_with(&["a", "b", "c"]);
        c.toggle_complete(id_of(&c, "c")).unwrap();
        assert_eq!(c.counts(), (3, 1));
    }
}
