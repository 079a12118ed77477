//! Board State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity over what the
//! task page renders.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::editing::EditSession;
use crate::filter::{self, CompletionAvailability, TaskFilters};
use crate::models::{Task, TaskId};

/// Task page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Last fetched collection, unsorted
    pub tasks: Vec<Task>,
    /// Initial fetch in flight (nothing cached yet)
    pub loading: bool,
    /// Fetch failure, shown with a retry button
    pub load_error: Option<String>,
    /// Failure of an update, delete or reorder
    pub action_error: Option<String>,
    /// Create, update or delete in flight
    pub pending: bool,
    /// Reorder in flight
    pub reordering: bool,
    pub filters: TaskFilters,
    pub editing: EditSession,
}

impl BoardState {
    pub fn sorted(&self) -> Vec<Task> {
        filter::sort_by_priority(&self.tasks)
    }

    pub fn visible(&self) -> Vec<Task> {
        self.filters.apply(&self.tasks)
    }

    pub fn availability(&self) -> CompletionAvailability {
        CompletionAvailability::of(&self.tasks)
    }
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

// ========================
// Store Helper Functions
// ========================

/// Write only when the value differs. Every `set` notifies readers, and the
/// task page remounts the whole list when `loading`/`load_error` notify.
fn set_if_changed<F, T>(field: F, value: T)
where
    F: WithUntracked<Value = T> + Set<Value = T>,
    T: PartialEq,
{
    if !field.with_untracked(|current| *current == value) {
        field.set(value);
    }
}

/// Replace the collection after a fetch.
///
/// An edit or delete aimed at a task that is no longer there is dropped.
pub fn store_set_tasks(store: &BoardStore, tasks: Vec<Task>) {
    if store.editing().with_untracked(|s| s.is_stale(&tasks)) {
        store.editing().update(EditSession::cancel);
    }
    set_if_changed(store.tasks(), tasks);
    set_if_changed(store.load_error(), None);
}

pub fn store_set_loading(store: &BoardStore, loading: bool) {
    set_if_changed(store.loading(), loading);
}

pub fn store_set_load_error(store: &BoardStore, message: Option<String>) {
    set_if_changed(store.load_error(), message);
}

pub fn store_set_action_error(store: &BoardStore, message: Option<String>) {
    set_if_changed(store.action_error(), message);
}

pub fn store_set_busy(store: &BoardStore, pending: bool, reordering: bool) {
    set_if_changed(store.pending(), pending);
    set_if_changed(store.reordering(), reordering);
}

/// Any write in flight, a reorder batch included
pub fn store_is_busy(store: &BoardStore) -> bool {
    store.pending().get() || store.reordering().get()
}

/// The checkbox also stays locked on the row under edit
pub fn store_toggle_locked(store: &BoardStore, id: TaskId) -> bool {
    store_is_busy(store) || store.editing().with(|s| s.is_editing(id))
}

/// Drop everything shown for a session that ended
pub fn store_reset(store: &BoardStore) {
    *store.write() = BoardState::default();
}

pub fn store_update_filters(store: &BoardStore, f: impl FnOnce(&mut TaskFilters)) {
    store.filters().update(f);
}

pub fn store_update_editing(store: &BoardStore, f: impl FnOnce(&mut EditSession)) {
    store.editing().update(f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CompletionFilter;
    use crate::test_support::task;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn board_with(tasks: Vec<Task>) -> BoardStore {
        Store::new(BoardState {
            tasks,
            ..BoardState::default()
        })
    }

    #[test]
    fn test_derived_views() {
        let mut state = BoardState {
            tasks: vec![task(2, "B", 1).toggled(), task(1, "A", 0)],
            ..BoardState::default()
        };
        assert_eq!(state.sorted()[0].title, "A");
        assert!(state.availability().completed);

        state.filters.set_completion(CompletionFilter::Incomplete);
        let visible = state.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "A");
    }

    #[test]
    fn test_refetch_with_same_state_does_not_notify_page() {
        let board = board_with(vec![task(1, "A", 0)]);
        let runs = Arc::new(AtomicUsize::new(0));
        let page = Memo::new({
            let runs = runs.clone();
            move |_| {
                runs.fetch_add(1, Ordering::SeqCst);
                (board.loading().get(), board.load_error().get())
            }
        });
        page.get_untracked();

        store_set_tasks(&board, vec![task(1, "A", 0)]);
        store_set_loading(&board, false);
        store_set_load_error(&board, None);
        page.get_untracked();
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        store_set_load_error(&board, Some("Network error".into()));
        page.get_untracked();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fetch_drops_edit_of_vanished_task() {
        let board = board_with(vec![task(1, "A", 0), task(2, "B", 1)]);
        store_update_editing(&board, |s| s.begin_edit(&task(2, "B", 1)));

        store_set_tasks(&board, vec![task(1, "A", 0), task(2, "B", 1)]);
        assert!(board.editing().with_untracked(|s| s.is_editing(2)));

        store_set_tasks(&board, vec![task(1, "A", 0)]);
        assert_eq!(board.editing().get_untracked(), EditSession::Idle);
    }

    #[test]
    fn test_row_controls_locked_during_reorder() {
        let board = board_with(vec![task(1, "A", 0), task(2, "B", 1)]);
        assert!(!store_is_busy(&board));
        assert!(!store_toggle_locked(&board, 1));

        store_set_busy(&board, false, true);
        assert!(store_is_busy(&board));
        assert!(store_toggle_locked(&board, 1));

        store_set_busy(&board, false, false);
        store_update_editing(&board, |s| s.begin_edit(&task(1, "A", 0)));
        assert!(store_toggle_locked(&board, 1));
        assert!(!store_toggle_locked(&board, 2));
    }
}
