//! Auth Commands
//!
//! `/api/auth` endpoints. The session itself lives in a cookie the
//! browser manages.

use async_trait::async_trait;
use reqwest::Method;

use super::{
    send_empty, send_json, AuthApi, HttpClient, AUTH_LOGIN_PATH, AUTH_LOGOUT_PATH,
    AUTH_SIGNUP_PATH, AUTH_USER_PATH,
};
use crate::error::AppResult;
use crate::models::{Credentials, CurrentUser, SignupRequest};

#[async_trait(?Send)]
impl AuthApi for HttpClient {
    async fn login(&self, credentials: &Credentials) -> AppResult<()> {
        send_empty(self.request(Method::POST, AUTH_LOGIN_PATH).json(credentials)).await
    }

    async fn signup(&self, request: &SignupRequest) -> AppResult<()> {
        send_empty(self.request(Method::POST, AUTH_SIGNUP_PATH).json(request)).await
    }

    async fn logout(&self) -> AppResult<()> {
        send_empty(self.request(Method::POST, AUTH_LOGOUT_PATH)).await
    }

    async fn current_user(&self) -> AppResult<CurrentUser> {
        send_json(self.request(Method::GET, AUTH_USER_PATH)).await
    }
}
