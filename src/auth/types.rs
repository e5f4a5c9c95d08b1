//! Credential and session types
//!
//! Neither type prints its secret through `Debug`.

use chrono::{DateTime, Utc};

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "sessionid";

/// Account credentials, fixed for the lifetime of a run
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials from a username and password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The account username
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// An authenticated session
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    established_at: DateTime<Utc>,
}

impl Session {
    /// Wrap a session id returned by the login endpoint
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            established_at: Utc::now(),
        }
    }

    /// The raw session id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When the login that produced this session completed
    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }

    /// Value for the `Cookie` request header
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.id)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &"***")
            .field("established_at", &self.established_at)
            .finish()
    }
}
