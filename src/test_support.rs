//! In-memory stand-ins for the REST backend, used by unit tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::commands::{AuthApi, TaskApi};
use crate::error::{AppError, AppResult};
use crate::models::{
    Credentials, CurrentUser, NewTask, SignupRequest, Task, TaskId, DATE_FORMAT,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
}

pub fn task(id: TaskId, title: &str, priority: i32) -> Task {
    Task {
        id,
        title: title.to_string(),
        completed: false,
        priority,
        date: None,
        user_id: None,
    }
}

pub fn dated(id: TaskId, title: &str, priority: i32, on: &str, completed: bool) -> Task {
    Task {
        date: Some(date(on)),
        completed,
        ..task(id, title, priority)
    }
}

fn server_error() -> AppError {
    AppError::from_status(500, "Internal Server Error".into())
}

/// Mimics the task endpoints over a Vec
#[derive(Default)]
pub struct FakeTaskApi {
    tasks: RefCell<Vec<Task>>,
    next_id: Cell<TaskId>,
    fail_on: Cell<Option<&'static str>>,
    list_calls: Cell<usize>,
    create_calls: Cell<usize>,
    last_reorder: RefCell<Option<Vec<Task>>>,
}

impl FakeTaskApi {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            tasks: RefCell::new(tasks),
            next_id: Cell::new(next_id),
            ..Self::default()
        }
    }

    /// Make the next call of `op` ("list", "create", "update", "delete",
    /// "reorder") fail with a 500
    pub fn fail_next(&self, op: &'static str) {
        self.fail_on.set(Some(op));
    }

    fn check(&self, op: &'static str) -> AppResult<()> {
        if self.fail_on.get() == Some(op) {
            self.fail_on.set(None);
            return Err(server_error());
        }
        Ok(())
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.get()
    }

    pub fn last_reorder(&self) -> Option<Vec<Task>> {
        self.last_reorder.borrow().clone()
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }
}

#[async_trait(?Send)]
impl TaskApi for FakeTaskApi {
    async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.check("list")?;
        Ok(self.snapshot())
    }

    async fn create_task(&self, new_task: &NewTask) -> AppResult<Task> {
        self.create_calls.set(self.create_calls.get() + 1);
        self.check("create")?;
        let id = self.next_id.get().max(1);
        self.next_id.set(id + 1);
        let created = Task {
            id,
            title: new_task.title.clone(),
            completed: new_task.completed,
            priority: new_task.priority,
            date: Some(new_task.date),
            user_id: None,
        };
        self.tasks.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, task: &Task) -> AppResult<Task> {
        self.check("update")?;
        let mut tasks = self.tasks.borrow_mut();
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| AppError::from_status(404, "Task not found".into()))?;
        *slot = task.clone();
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> AppResult<()> {
        self.check("delete")?;
        self.tasks.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }

    async fn reorder_tasks(&self, reordered: &[Task]) -> AppResult<()> {
        self.check("reorder")?;
        *self.last_reorder.borrow_mut() = Some(reordered.to_vec());
        let mut tasks = self.tasks.borrow_mut();
        for incoming in reordered {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == incoming.id) {
                task.priority = incoming.priority;
            }
        }
        Ok(())
    }
}

/// Mimics the auth endpoints for a single account
pub struct FakeAuthApi {
    pub email: String,
    pub password: String,
    pub user: CurrentUser,
    signed_in: Cell<bool>,
    signup_error: RefCell<Option<String>>,
    user_lookup_fails: Cell<bool>,
    pub logout_calls: Cell<usize>,
}

impl FakeAuthApi {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            user: CurrentUser {
                id: Some(1),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: Some(email.to_string()),
            },
            signed_in: Cell::new(false),
            signup_error: RefCell::new(None),
            user_lookup_fails: Cell::new(false),
            logout_calls: Cell::new(0),
        }
    }

    pub fn signed_in(self) -> Self {
        self.signed_in.set(true);
        self
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in.get()
    }

    /// Reject signups with this response body
    pub fn reject_signup(&self, body: &str) {
        *self.signup_error.borrow_mut() = Some(body.to_string());
    }

    pub fn break_user_lookup(&self) {
        self.user_lookup_fails.set(true);
    }
}

#[async_trait(?Send)]
impl AuthApi for FakeAuthApi {
    async fn login(&self, credentials: &Credentials) -> AppResult<()> {
        if credentials.email == self.email && credentials.password == self.password {
            self.signed_in.set(true);
            Ok(())
        } else {
            Err(AppError::from_status(401, "Bad credentials".into()))
        }
    }

    async fn signup(&self, _request: &SignupRequest) -> AppResult<()> {
        match self.signup_error.borrow().as_deref() {
            Some(body) => Err(AppError::from_status(400, body.to_string())),
            None => Ok(()),
        }
    }

    async fn logout(&self) -> AppResult<()> {
        self.logout_calls.set(self.logout_calls.get() + 1);
        self.signed_in.set(false);
        Ok(())
    }

    async fn current_user(&self) -> AppResult<CurrentUser> {
        if self.user_lookup_fails.get() {
            return Err(server_error());
        }
        if self.signed_in.get() {
            Ok(self.user.clone())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
