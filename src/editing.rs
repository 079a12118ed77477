//! Editing Session
//!
//! At most one task is under inline edit or pending delete confirmation.
//! Starting either on any task replaces whatever was in progress.

use crate::models::{Task, TaskId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { id: TaskId, draft: String },
    Deleting { id: TaskId },
}

impl EditSession {
    /// Seed the draft with the current title
    pub fn begin_edit(&mut self, task: &Task) {
        *self = EditSession::Editing {
            id: task.id,
            draft: task.title.clone(),
        };
    }

    pub fn set_draft(&mut self, value: &str) {
        if let EditSession::Editing { draft, .. } = self {
            *draft = value.to_string();
        }
    }

    pub fn begin_delete(&mut self, id: TaskId) {
        *self = EditSession::Deleting { id };
    }

    /// Discard without any network call
    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        match self {
            EditSession::Editing { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn deleting_id(&self) -> Option<TaskId> {
        match self {
            EditSession::Deleting { id } => Some(*id),
            _ => None,
        }
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn is_deleting(&self, id: TaskId) -> bool {
        self.deleting_id() == Some(id)
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditSession::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Save is blocked for a blank draft or while a mutation is in flight
    pub fn can_save(&self, busy: bool) -> bool {
        !busy && self.draft().is_some_and(|d| !d.trim().is_empty())
    }

    /// Task to send to `update`: the edited title merged into the record
    pub fn save_request(&self, tasks: &[Task], busy: bool) -> Option<Task> {
        if !self.can_save(busy) {
            return None;
        }
        let EditSession::Editing { id, draft } = self else {
            return None;
        };
        tasks.iter().find(|t| t.id == *id).map(|t| t.with_title(draft))
    }

    /// The edited or deleted task is gone from `tasks`
    pub fn is_stale(&self, tasks: &[Task]) -> bool {
        self.editing_id()
            .or(self.deleting_id())
            .is_some_and(|id| !tasks.iter().any(|t| t.id == id))
    }

    /// Id to send to `delete` once confirmed
    pub fn delete_request(&self, busy: bool) -> Option<TaskId> {
        if busy {
            return None;
        }
        self.deleting_id()
    }

    /// Return to idle after a successful save or delete of `id`. A session
    /// that has since moved to another task is left alone.
    pub fn complete(&mut self, id: TaskId) {
        let current = self.editing_id().or(self.deleting_id());
        if current == Some(id) {
            *self = EditSession::Idle;
        }
    }
}
