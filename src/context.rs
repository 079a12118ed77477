//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, error, warn};

use crate::commands::HttpClient;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::models::CurrentUser;
use crate::session::SessionState;
use crate::store::{
    store_reset, store_set_action_error, store_set_busy, store_set_load_error, store_set_loading,
    store_set_tasks, BoardStateStoreFields, BoardStore,
};
use crate::task_store::{Operation, TaskStore};

pub type Tasks = Arc<TaskStore<HttpClient>>;

/// Non-reactive services shared by every component
struct Services {
    client: HttpClient,
    tasks: Tasks,
    config: AppConfig,
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    services: StoredValue<Services>,
    /// Task page state
    pub board: BoardStore,
    /// Who is signed in
    pub session: RwSignal<SessionState>,
    /// Trigger to reload tasks - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload tasks - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(config: AppConfig, board: BoardStore) -> Self {
        let client = HttpClient::new(&config.api_base);
        let tasks = Arc::new(TaskStore::new(client.clone()));
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        Self {
            services: StoredValue::new(Services {
                client,
                tasks,
                config,
            }),
            board,
            session: RwSignal::new(SessionState::Checking),
            reload_trigger,
            set_reload_trigger,
        }
    }

    pub fn client(&self) -> HttpClient {
        self.services.with_value(|s| s.client.clone())
    }

    pub fn tasks(&self) -> Tasks {
        self.services.with_value(|s| s.tasks.clone())
    }

    pub fn config(&self) -> AppConfig {
        self.services.with_value(|s| s.config.clone())
    }

    /// Trigger a reload of tasks (served from cache when still valid)
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Drop the cached collection and fetch again
    pub fn refresh(&self) {
        self.tasks().invalidate();
        self.reload();
    }

    /// Fetch tasks into the board
    pub async fn load_tasks(&self) {
        let tasks = self.tasks();
        let board = self.board;
        // Later refetches keep the current list on screen
        if tasks.cached().is_none() && board.tasks().with_untracked(Vec::is_empty) {
            store_set_loading(&board, true);
        }

        match tasks.load().await {
            Ok(list) => store_set_tasks(&board, list),
            Err(err) if err.is_unauthorized() => self.session_expired(),
            Err(err) => {
                error!(%err, "could not load tasks");
                store_set_load_error(&board, Some(err.user_message()));
            }
        }
        store_set_loading(&board, false);
    }

    /// Disable mutation controls before the first await
    pub fn begin_mutation(&self) {
        let reordering = self.board.reordering().get_untracked();
        store_set_busy(&self.board, true, reordering);
    }

    /// Mirror the store's busy flags into the board
    pub fn sync_busy(&self) {
        let tasks = self.tasks();
        store_set_busy(&self.board, tasks.is_loading(), tasks.is_busy(Operation::Reorder));
    }

    /// Settle a mutation started from the task list.
    ///
    /// Failures show up in the list's inline error; success clears it.
    /// Returns whether the mutation succeeded.
    pub fn finish_action<T>(&self, action: &str, result: AppResult<T>) -> bool {
        self.sync_busy();
        let ok = match result {
            Ok(_) => {
                store_set_action_error(&self.board, None);
                true
            }
            Err(err) if err.is_unauthorized() => {
                self.session_expired();
                return false;
            }
            Err(err) => {
                error!(%err, action, "task action failed");
                let message = format!("Could not {}: {}", action, err.user_message());
                store_set_action_error(&self.board, Some(message));
                false
            }
        };
        self.reload();
        ok
    }

    pub fn dismiss_error(&self) {
        store_set_action_error(&self.board, None);
    }

    /// Report a failure that never reached the backend
    pub fn action_failed(&self, message: String) {
        warn!(%message, "task action rejected");
        store_set_action_error(&self.board, Some(message));
    }

    pub fn signed_in(&self, user: CurrentUser) {
        store_reset(&self.board);
        self.session.set(SessionState::SignedIn(user));
        self.reload();
    }

    pub fn signed_out(&self) {
        store_reset(&self.board);
        self.session.set(SessionState::SignedOut);
    }

    /// Backend answered 401: the cookie is gone
    pub fn session_expired(&self) {
        warn!("session expired");
        self.tasks().clear();
        self.signed_out();
    }

    /// Restore a session left from a previous visit
    pub fn restore_session(&self) {
        let ctx = *self;
        spawn_local(async move {
            let state = crate::session::restore(&ctx.client()).await;
            debug!(?state, "startup session check done");
            match state {
                SessionState::SignedIn(user) => ctx.signed_in(user),
                _ => ctx.signed_out(),
            }
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
