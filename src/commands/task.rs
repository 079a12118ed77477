//! Task Commands
//!
//! `/api/tasks` endpoints.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;

use super::{send_empty, send_json, task_path, HttpClient, TaskApi, REORDER_PATH, TASKS_PATH};
use crate::error::AppResult;
use crate::models::{NewTask, Task, TaskId};

#[async_trait(?Send)]
impl TaskApi for HttpClient {
    async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        send_json(self.request(Method::GET, TASKS_PATH)).await
    }

    async fn create_task(&self, task: &NewTask) -> AppResult<Task> {
        let builder = self
            .request(Method::POST, TASKS_PATH)
            .header(CONTENT_TYPE, "application/json")
            .json(task);
        send_json(builder).await
    }

    async fn update_task(&self, task: &Task) -> AppResult<Task> {
        send_json(self.request(Method::PUT, &task_path(task.id)).json(task)).await
    }

    async fn delete_task(&self, id: TaskId) -> AppResult<()> {
        send_empty(self.request(Method::DELETE, &task_path(id))).await
    }

    async fn reorder_tasks(&self, tasks: &[Task]) -> AppResult<()> {
        // Response body is ignored
        send_empty(self.request(Method::POST, REORDER_PATH).json(tasks)).await
    }
}
