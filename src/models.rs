//! Frontend Models
//!
//! Data structures matching the REST API payloads (camelCase on the wire).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Wire format of task dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub type TaskId = i64;

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl Task {
    /// Same record with `completed` flipped
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Same record with a new (trimmed) title
    pub fn with_title(&self, title: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            ..self.clone()
        }
    }

    pub fn month(&self) -> Option<MonthKey> {
        self.date.map(MonthKey::of)
    }
}

/// Task payload before the backend assigns an id
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
    pub priority: i32,
    pub date: NaiveDate,
}

impl NewTask {
    pub fn new(title: &str, date: NaiveDate, priority: i32) -> Result<Self, ValidationError> {
        let task = Self {
            title: title.trim().to_string(),
            completed: false,
            priority,
            date,
        };
        task.validate()?;
        Ok(task)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Calendar month, rendered as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{}-01", s), DATE_FORMAT)
            .map(MonthKey::of)
            .map_err(|_| ValidationError::InvalidMonth(s.to_string()))
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::EmptyDate);
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Signed-in user as returned by `/api/auth/user`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl CurrentUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Avatar letter
    pub fn initial(&self) -> char {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// Login request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Signup request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_task_from_backend_json() {
        let task: Task = serde_json::from_value(json!({
            "id": 7,
            "title": "Buy milk",
            "completed": false,
            "priority": 2,
            "date": "2025-06-01",
            "userId": 3
        }))
        .unwrap();

        assert_eq!(task.id, 7);
        assert_eq!(task.date, Some(date("2025-06-01")));
        assert_eq!(task.user_id, Some(3));
    }

    #[test]
    fn test_task_tolerates_missing_optional_fields() {
        let task: Task = serde_json::from_value(json!({ "id": 1, "title": "Old" })).unwrap();
        assert!(!task.completed);
        assert_eq!(task.priority, 0);
        assert_eq!(task.date, None);
    }

    #[test]
    fn test_new_task_wire_shape_has_no_id() {
        let task = NewTask::new("  Buy milk ", date("2025-06-01"), 4).unwrap();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            json!({ "title": "Buy milk", "completed": false, "priority": 4, "date": "2025-06-01" })
        );
    }

    #[test]
    fn test_new_task_rejects_blank_title() {
        assert_eq!(
            NewTask::new("   ", date("2025-06-01"), 0),
            Err(ValidationError::EmptyTitle)
        );
    }

    #[test]
    fn test_toggle_twice_restores_completed() {
        let task = Task {
            id: 1,
            title: "A".into(),
            completed: false,
            priority: 0,
            date: None,
            user_id: None,
        };
        assert!(task.toggled().completed);
        assert_eq!(task.toggled().toggled(), task);
    }

    #[test]
    fn test_month_key_parse_and_display() {
        let month: MonthKey = "2025-06".parse().unwrap();
        assert_eq!(month.to_string(), "2025-06");
        assert!(month.contains(date("2025-06-30")));
        assert!(!month.contains(date("2025-07-01")));
        assert!("2025-13".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_keys_sort_chronologically() {
        let mut months: Vec<MonthKey> = ["2025-10", "2024-12", "2025-02"]
            .iter()
            .map(|m| m.parse().unwrap())
            .collect();
        months.sort();
        let rendered: Vec<String> = months.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["2024-12", "2025-02", "2025-10"]);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(""), Err(ValidationError::EmptyDate));
        assert!(matches!(parse_date("06/01/2025"), Err(ValidationError::InvalidDate(_))));
        assert_eq!(parse_date(" 2025-06-01 "), Ok(date("2025-06-01")));
    }

    #[test]
    fn test_user_display_name_and_initial() {
        let user: CurrentUser =
            serde_json::from_value(json!({ "firstName": "ada", "lastName": "Lovelace" })).unwrap();
        assert_eq!(user.display_name(), "ada Lovelace");
        assert_eq!(user.initial(), 'A');
        assert_eq!(CurrentUser::default().initial(), '?');
    }

    #[test]
    fn test_signup_request_is_camel_case() {
        let request = SignupRequest {
            password: "pw".into(),
            first_name: "New".into(),
            last_name: "User".into(),
            email: "new@example.com".into(),
            date_of_birth: "2005-01-01".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["firstName"], "New");
        assert_eq!(value["dateOfBirth"], "2005-01-01");
    }
}
