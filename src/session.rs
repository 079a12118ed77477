//! Session
//!
//! Authentication gate in front of the task page. The backend owns the
//! session cookie; this module only tracks who is signed in.

use tracing::{info, warn};

use crate::commands::{AuthApi, TaskApi};
use crate::error::AppError;
use crate::forms::{LoginInput, SignupInput};
use crate::models::CurrentUser;
use crate::task_store::TaskStore;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const SIGNUP_FAILED: &str = "Signup failed";
pub const SIGNUP_SUCCEEDED: &str = "Signup successful! You can now log in.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Startup lookup of an existing session
    #[default]
    Checking,
    SignedOut,
    SignedIn(CurrentUser),
}

impl SessionState {
    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            SessionState::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

/// Which form the signed-out screen shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScreen {
    #[default]
    Login,
    Signup,
}

/// Pick up a session cookie left from a previous visit
pub async fn restore<A: AuthApi>(api: &A) -> SessionState {
    match api.current_user().await {
        Ok(user) => {
            info!(user = %user.display_name(), "session restored");
            SessionState::SignedIn(user)
        }
        Err(err) => {
            if !err.is_unauthorized() {
                warn!(%err, "session lookup failed");
            }
            SessionState::SignedOut
        }
    }
}

/// Failure details are logged, the caller only gets the generic alert text
pub async fn sign_in<A: AuthApi>(api: &A, input: &LoginInput) -> Result<CurrentUser, String> {
    let credentials = input.credentials().map_err(|err| {
        warn!(%err, "login form incomplete");
        INVALID_CREDENTIALS.to_string()
    })?;

    if let Err(err) = api.login(&credentials).await {
        warn!(%err, "login failed");
        return Err(INVALID_CREDENTIALS.to_string());
    }

    let user = match api.current_user().await {
        Ok(user) => user,
        Err(err) => {
            warn!(%err, "signed in but user lookup failed");
            CurrentUser::default()
        }
    };
    info!(user = %user.display_name(), "signed in");
    Ok(user)
}

/// Returns the success banner text, or the message to show inline
pub async fn sign_up<A: AuthApi>(api: &A, input: &SignupInput) -> Result<&'static str, String> {
    let request = input.request().map_err(|err| err.to_string())?;

    match api.signup(&request).await {
        Ok(()) => {
            info!(email = %request.email, "account created");
            Ok(SIGNUP_SUCCEEDED)
        }
        Err(err) => {
            warn!(%err, "signup failed");
            match err {
                AppError::Status { message, .. } if !message.is_empty() => Err(message),
                _ => Err(SIGNUP_FAILED.to_string()),
            }
        }
    }
}

/// The local session ends even when the logout call fails
pub async fn sign_out<A: AuthApi, T: TaskApi>(api: &A, store: &TaskStore<T>) -> SessionState {
    if let Err(err) = api.logout().await {
        warn!(%err, "logout request failed");
    }
    store.clear();
    info!("signed out");
    SessionState::SignedOut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{task, FakeAuthApi, FakeTaskApi};

    fn login(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.into(),
            password: password.into(),
        }
    }

    fn signup() -> SignupInput {
        SignupInput {
            first_name: "New".into(),
            last_name: "User".into(),
            email: "new@example.com".into(),
            date_of_birth: "2005-01-01".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        }
    }

    #[tokio::test]
    async fn test_restore_existing_session() {
        let api = FakeAuthApi::new("ada@example.com", "pw").signed_in();
        let state = restore(&api).await;
        assert_eq!(state.user().map(CurrentUser::display_name), Some("Ada Lovelace".into()));
    }

    #[tokio::test]
    async fn test_restore_without_cookie() {
        let api = FakeAuthApi::new("ada@example.com", "pw");
        assert_eq!(restore(&api).await, SessionState::SignedOut);
    }

    #[tokio::test]
    async fn test_sign_in() {
        let api = FakeAuthApi::new("ada@example.com", "pw");
        let user = sign_in(&api, &login(" ada@example.com ", "pw")).await.unwrap();
        assert_eq!(user.first_name, "Ada");
        assert!(api.is_signed_in());
    }

    #[tokio::test]
    async fn test_bad_password_gets_generic_message() {
        let api = FakeAuthApi::new("ada@example.com", "pw");
        let err = sign_in(&api, &login("ada@example.com", "nope")).await.unwrap_err();
        assert_eq!(err, INVALID_CREDENTIALS);

        let err = sign_in(&api, &login("", "")).await.unwrap_err();
        assert_eq!(err, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_sign_in_survives_user_lookup_failure() {
        let api = FakeAuthApi::new("ada@example.com", "pw");
        api.break_user_lookup();
        let user = sign_in(&api, &login("ada@example.com", "pw")).await.unwrap();
        assert_eq!(user, CurrentUser::default());
    }

    #[tokio::test]
    async fn test_sign_up() {
        let api = FakeAuthApi::new("ada@example.com", "pw");
        assert_eq!(sign_up(&api, &signup()).await, Ok(SIGNUP_SUCCEEDED));

        let mismatch = SignupInput {
            confirm_password: "other".into(),
            ..signup()
        };
        assert_eq!(sign_up(&api, &mismatch).await, Err("Passwords do not match".into()));
    }

    #[tokio::test]
    async fn test_sign_up_shows_server_reason() {
        let api = FakeAuthApi::new("ada@example.com", "pw");
        api.reject_signup("Email already exists");
        assert_eq!(sign_up(&api, &signup()).await, Err("Email already exists".into()));

        api.reject_signup("");
        assert_eq!(sign_up(&api, &signup()).await, Err(SIGNUP_FAILED.into()));
    }

    #[tokio::test]
    async fn test_sign_out_clears_cache() {
        let auth = FakeAuthApi::new("ada@example.com", "pw").signed_in();
        let store = TaskStore::new(FakeTaskApi::with_tasks(vec![task(1, "A", 0)]));
        store.load().await.unwrap();

        assert_eq!(sign_out(&auth, &store).await, SessionState::SignedOut);
        assert!(store.cached().is_none());
        assert_eq!(auth.logout_calls.get(), 1);
        assert!(!auth.is_signed_in());
    }
}
