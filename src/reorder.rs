//! Reorder Coordinator
//!
//! A drag gesture ends in a single (source, destination) move over the
//! priority-sorted list. The new ordering is computed as a pure splice and
//! dense renumbering, then persisted in one batch.

use tracing::{debug, info, warn};

use crate::commands::TaskApi;
use crate::error::AppResult;
use crate::models::{Task, TaskId};
use crate::task_store::{Operation, TaskStore};

/// Indices into the priority-sorted list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

/// Assign `priority = index` to every task
pub fn renumber(tasks: &mut [Task]) {
    for (index, task) in tasks.iter_mut().enumerate() {
        task.priority = index as i32;
    }
}

/// Move `sorted[from]` to position `to` and renumber densely.
///
/// `None` when there is no destination or `from` is out of range. A
/// destination past the end is clamped to the last position.
pub fn apply_move(sorted: &[Task], from: usize, to: Option<usize>) -> Option<Vec<Task>> {
    let to = to?;
    if from >= sorted.len() {
        return None;
    }
    let mut reordered = sorted.to_vec();
    let task = reordered.remove(from);
    let to = to.min(reordered.len());
    reordered.insert(to, task);
    renumber(&mut reordered);
    Some(reordered)
}

/// Translate a drop in the filtered view into a move over the sorted list.
///
/// Slot `k` sits before `visible[k]`; a slot at or past `visible.len()`
/// means after the last visible task.
pub fn resolve_drop(sorted: &[Task], visible: &[Task], dragged: TaskId, slot: usize) -> Option<Move> {
    let position = |id: TaskId| sorted.iter().position(|t| t.id == id);

    let from = position(dragged)?;
    let target = match visible.get(slot) {
        Some(task) => position(task.id)?,
        None => position(visible.last()?.id)? + 1,
    };
    let to = if target > from { target - 1 } else { target };

    (to != from).then_some(Move { from, to })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome {
    /// Nothing to persist
    Unchanged,
    /// New ordering accepted by the backend
    Persisted(Vec<Task>),
}

pub struct ReorderCoordinator<'a, A> {
    store: &'a TaskStore<A>,
}

impl<'a, A: TaskApi> ReorderCoordinator<'a, A> {
    pub fn new(store: &'a TaskStore<A>) -> Self {
        Self { store }
    }

    /// Persist the move and let the store invalidate its cache.
    ///
    /// The reordered list is only returned once the backend accepted it;
    /// on failure nothing is applied locally.
    pub async fn reorder(&self, sorted: &[Task], from: usize, to: Option<usize>) -> AppResult<ReorderOutcome> {
        if self.store.is_busy(Operation::Reorder) {
            debug!("reorder already in flight, ignoring drop");
            return Ok(ReorderOutcome::Unchanged);
        }
        let Some(reordered) = apply_move(sorted, from, to) else {
            return Ok(ReorderOutcome::Unchanged);
        };

        match self.store.reorder(&reordered).await {
            Ok(()) => {
                info!(from, to = ?to, count = reordered.len(), "tasks reordered");
                Ok(ReorderOutcome::Persisted(reordered))
            }
            Err(err) => {
                warn!(%err, "reorder failed");
                Err(err)
            }
        }
    }

    /// Handle a drop on `slot` of the filtered view
    pub async fn drop_on_slot(
        &self,
        sorted: &[Task],
        visible: &[Task],
        dragged: TaskId,
        slot: usize,
    ) -> AppResult<ReorderOutcome> {
        match resolve_drop(sorted, visible, dragged, slot) {
            Some(Move { from, to }) => self.reorder(sorted, from, Some(to)).await,
            None => Ok(ReorderOutcome::Unchanged),
        }
    }
}
