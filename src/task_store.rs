//! Task Store
//!
//! Owns the fetched task collection and the four mutations. Nothing is
//! applied locally ahead of the server: each mutation waits for the remote
//! call and then invalidates the cached collection, so the next `load`
//! refetches it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::cache::{QueryKey, TaskCache};
use crate::commands::TaskApi;
use crate::error::{AppResult, ValidationError};
use crate::models::{NewTask, Task, TaskId};

const TASKS_KEY: QueryKey = QueryKey::CurrentUserTasks;

/// Logical operations with their own busy flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Reorder,
}

impl Operation {
    fn index(self) -> usize {
        match self {
            Operation::Create => 0,
            Operation::Update => 1,
            Operation::Delete => 2,
            Operation::Reorder => 3,
        }
    }
}

/// In-flight counters per operation
#[derive(Debug, Default)]
pub struct BusyFlags {
    counts: [AtomicUsize; 4],
}

impl BusyFlags {
    pub fn enter(&self, op: Operation) -> BusyGuard<'_> {
        self.counts[op.index()].fetch_add(1, Ordering::SeqCst);
        BusyGuard { flags: self, op }
    }

    pub fn is_busy(&self, op: Operation) -> bool {
        self.counts[op.index()].load(Ordering::SeqCst) > 0
    }
}

/// Clears its busy flag when dropped, including on early return
pub struct BusyGuard<'a> {
    flags: &'a BusyFlags,
    op: Operation,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flags.counts[self.op.index()].fetch_sub(1, Ordering::SeqCst);
    }
}

/// Priority for a task appended after `tasks`
pub fn next_priority(tasks: &[Task]) -> i32 {
    tasks.iter().map(|t| t.priority).max().map_or(0, |max| max + 1)
}

pub struct TaskStore<A> {
    api: A,
    cache: Mutex<TaskCache>,
    busy: BusyFlags,
}

impl<A: TaskApi> TaskStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: Mutex::new(TaskCache::new()),
            busy: BusyFlags::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn cache(&self) -> MutexGuard<'_, TaskCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached collection without fetching
    pub fn cached(&self) -> Option<Vec<Task>> {
        self.cache().get(TASKS_KEY).map(<[Task]>::to_vec)
    }

    /// Tasks of the signed-in user, from cache or freshly fetched
    pub async fn load(&self) -> AppResult<Vec<Task>> {
        let generation = {
            let cache = self.cache();
            if let Some(tasks) = cache.get(TASKS_KEY) {
                return Ok(tasks.to_vec());
            }
            cache.generation(TASKS_KEY)
        };

        debug!("fetching tasks");
        let tasks = self.api.list_tasks().await.inspect_err(|err| {
            warn!(%err, "loading tasks failed");
        })?;

        if !self.cache().put(TASKS_KEY, tasks.clone(), generation) {
            debug!("tasks changed during fetch, result not cached");
        }
        debug!(count = tasks.len(), "tasks loaded");
        Ok(tasks)
    }

    /// Manual refresh
    pub async fn refetch(&self) -> AppResult<Vec<Task>> {
        self.invalidate();
        self.load().await
    }

    pub fn invalidate(&self) {
        self.cache().invalidate(TASKS_KEY);
    }

    /// Forget everything (logout)
    pub fn clear(&self) {
        self.cache().clear();
    }

    pub async fn create(&self, task: NewTask) -> AppResult<Task> {
        task.validate()?;
        let _busy = self.busy.enter(Operation::Create);

        let created = self.api.create_task(&task).await?;
        self.invalidate();
        info!(id = created.id, "task created");
        Ok(created)
    }

    /// Full-record replace
    pub async fn update(&self, task: Task) -> AppResult<Task> {
        if task.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let _busy = self.busy.enter(Operation::Update);

        let updated = self.api.update_task(&task).await?;
        self.invalidate();
        info!(id = updated.id, "task updated");
        Ok(updated)
    }

    /// Update with `completed` flipped
    pub async fn toggle(&self, task: &Task) -> AppResult<Task> {
        self.update(task.toggled()).await
    }

    pub async fn delete(&self, id: TaskId) -> AppResult<()> {
        let _busy = self.busy.enter(Operation::Delete);

        self.api.delete_task(id).await?;
        self.invalidate();
        info!(id, "task deleted");
        Ok(())
    }

    /// Persist a reordered list in one batch.
    ///
    /// The cache is invalidated whether or not the call succeeds: the
    /// backend may have applied part of the batch.
    pub async fn reorder(&self, tasks: &[Task]) -> AppResult<()> {
        let _busy = self.busy.enter(Operation::Reorder);

        let result = self.api.reorder_tasks(tasks).await;
        self.invalidate();
        result
    }

    /// True while any create/update/delete is in flight
    pub fn is_loading(&self) -> bool {
        [Operation::Create, Operation::Update, Operation::Delete]
            .into_iter()
            .any(|op| self.busy.is_busy(op))
    }

    pub fn is_busy(&self, op: Operation) -> bool {
        self.busy.is_busy(op)
    }
}
