//! Login against the remote service

use super::types::{Credentials, Session};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use serde_json::Value;
use tracing::{debug, info};

/// Login endpoint path
pub const LOGIN_PATH: &str = "/api/1/users/login";

/// Session authenticator
#[derive(Debug, Clone)]
pub struct Authenticator {
    /// HTTP client for the login request
    http_client: HttpClient,
    /// Account credentials
    credentials: Credentials,
}

impl Authenticator {
    /// Create an authenticator for the default login endpoint
    pub fn new(http_client: HttpClient, credentials: Credentials) -> Self {
        Self {
            http_client,
            credentials,
        }
    }

    /// Post the credentials and return the resulting session.
    ///
    /// Any non-2xx response, or a body without `data.sessionid`, is an
    /// [`Error::Auth`].
    pub async fn login(&self) -> Result<Session> {
        debug!("Logging in at {}", LOGIN_PATH);

        let config = RequestConfig::new()
            .form_field("username", self.credentials.username())
            .form_field("password", self.credentials.password());

        let body: Value = self
            .http_client
            .post_json_with_config(LOGIN_PATH, config)
            .await
            .map_err(|e| match e {
                Error::Transport { status, body, .. } => Error::auth(format!(
                    "Login request failed with status {status}: {body}"
                )),
                other => other,
            })?;

        let session_id = body
            .pointer("/data/sessionid")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::auth("Login response did not contain a session id"))?;

        info!("Logged in as {}", self.credentials.username());
        Ok(Session::new(session_id))
    }
}
