//! Authentication module
//!
//! Session-based login against the remote service.
//!
//! The `Authenticator` posts the account credentials to the login endpoint and
//! turns the returned session id into a [`Session`], which is sent as a cookie
//! on every later request. Sessions carry no expiry; a rejected session is
//! replaced by logging in again.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, LOGIN_PATH};
pub use types::{Credentials, Session};

#[cfg(test)]
mod tests;
