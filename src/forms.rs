//! Form State
//!
//! Plain input structs behind the add-task, login and signup forms. The
//! components bind signals to these and ask them whether submit is allowed.

use chrono::{Local, NaiveDate};

use crate::error::ValidationError;
use crate::models::{parse_date, Credentials, NewTask, SignupRequest, DATE_FORMAT};

/// Local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskInput {
    pub title: String,
    /// Raw `YYYY-MM-DD` value of the date input
    pub date: String,
}

impl NewTaskInput {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn can_submit(&self, busy: bool) -> bool {
        !busy && !self.title.trim().is_empty() && !self.date.trim().is_empty()
    }

    pub fn to_new_task(&self, priority: i32) -> Result<NewTask, ValidationError> {
        let date = parse_date(&self.date)?;
        NewTask::new(&self.title, date, priority)
    }

    /// Clear the title after a successful create; the date is kept
    pub fn reset_title(&mut self) {
        self.title.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    pub fn credentials(&self) -> Result<Credentials, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingField("Email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("Password"));
        }
        Ok(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupInput {
    /// Password mismatch is reported before anything else
    pub fn request(&self) -> Result<SignupRequest, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        let required = [
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("Email", &self.email),
            ("Date of birth", &self.date_of_birth),
            ("Password", &self.password),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }
        Ok(SignupRequest {
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::date;

    #[test]
    fn test_new_task_form_defaults_to_today() {
        let input = NewTaskInput::new(date("2025-06-01"));
        assert_eq!(input.date, "2025-06-01");
        assert!(input.title.is_empty());
    }

    #[test]
    fn test_submit_enabled_only_with_title_and_date() {
        let mut input = NewTaskInput::new(date("2025-06-01"));
        assert!(!input.can_submit(false));

        input.title = "   ".into();
        assert!(!input.can_submit(false));

        input.title = "Buy milk".into();
        assert!(input.can_submit(false));
        assert!(!input.can_submit(true));

        input.date.clear();
        assert!(!input.can_submit(false));
    }

    #[test]
    fn test_to_new_task() {
        let mut input = NewTaskInput::new(date("2025-06-01"));
        input.title = " Buy milk ".into();
        let task = input.to_new_task(3).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.priority, 3);
        assert!(!task.completed);

        input.reset_title();
        assert_eq!(input.to_new_task(0), Err(ValidationError::EmptyTitle));
        assert_eq!(input.date, "2025-06-01");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let input = LoginInput {
            email: "ada@example.com".into(),
            password: String::new(),
        };
        assert_eq!(input.credentials(), Err(ValidationError::MissingField("Password")));
    }

    #[test]
    fn test_signup_mismatch_checked_first() {
        let input = SignupInput {
            password: "secret".into(),
            confirm_password: "secreT".into(),
            ..SignupInput::default()
        };
        assert_eq!(input.request(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_signup_request() {
        let input = SignupInput {
            first_name: "New".into(),
            last_name: "User".into(),
            email: " new@example.com ".into(),
            date_of_birth: "2005-01-01".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        };
        let request = input.request().unwrap();
        assert_eq!(request.email, "new@example.com");

        let missing = SignupInput {
            last_name: String::new(),
            ..input
        };
        assert_eq!(missing.request(), Err(ValidationError::MissingField("Last name")));
    }
}
