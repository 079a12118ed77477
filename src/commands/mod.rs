//! REST Command Wrappers
//!
//! Frontend bindings to backend endpoints, organized by domain.
//! `TaskApi` and `AuthApi` are the seams the rest of the app depends on;
//! `HttpClient` is the browser implementation.

mod auth;
mod task;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::models::{Credentials, CurrentUser, NewTask, SignupRequest, Task, TaskId};

pub const TASKS_PATH: &str = "/api/tasks";
pub const REORDER_PATH: &str = "/api/tasks/reorder";
pub const AUTH_USER_PATH: &str = "/api/auth/user";
pub const AUTH_LOGIN_PATH: &str = "/api/auth/login";
pub const AUTH_SIGNUP_PATH: &str = "/api/auth/signup";
pub const AUTH_LOGOUT_PATH: &str = "/api/auth/logout";

pub fn task_path(id: TaskId) -> String {
    format!("{}/{}", TASKS_PATH, id)
}

/// Task endpoints
#[async_trait(?Send)]
pub trait TaskApi {
    /// All tasks of the signed-in user
    async fn list_tasks(&self) -> AppResult<Vec<Task>>;

    /// Create a task; the backend assigns the id
    async fn create_task(&self, task: &NewTask) -> AppResult<Task>;

    /// Full-record replace
    async fn update_task(&self, task: &Task) -> AppResult<Task>;

    async fn delete_task(&self, id: TaskId) -> AppResult<()>;

    /// Persist a whole reordered list in one call
    async fn reorder_tasks(&self, tasks: &[Task]) -> AppResult<()>;
}

/// Session endpoints
#[async_trait(?Send)]
pub trait AuthApi {
    async fn login(&self, credentials: &Credentials) -> AppResult<()>;

    async fn signup(&self, request: &SignupRequest) -> AppResult<()>;

    async fn logout(&self) -> AppResult<()>;

    async fn current_user(&self) -> AppResult<CurrentUser>;
}

/// reqwest-backed client for the REST API
#[derive(Debug, Clone)]
pub struct HttpClient {
    base: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        with_credentials(self.client.request(method, self.url(path)))
    }
}

/// Send the session cookie along with cross-origin fetches
#[cfg(target_arch = "wasm32")]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder
}

async fn send(builder: RequestBuilder) -> AppResult<Response> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::from_status(status.as_u16(), body))
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> AppResult<T> {
    let response = send(builder).await?;
    Ok(response.json::<T>().await?)
}

async fn send_empty(builder: RequestBuilder) -> AppResult<()> {
    send(builder).await.map(|_| ())
}
