// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login against the backend.
//!
//! - [`Credentials`] - Validated, non-empty username/password pair
//! - [`SessionAuthenticator`] - Performs the single `POST /login` exchange
//! - [`AuthResult`] - Outcome of one login attempt
//! - [`SessionId`] - Opaque identifier returned on success

mod authenticator;

use std::fmt;

pub use authenticator::SessionAuthenticator;

use crate::error::ValidationError;

/// Username/password pair for one login attempt.
///
/// Both fields are guaranteed non-empty. Credentials are consumed by
/// [`SessionAuthenticator::authenticate`] and dropped once the request body
/// has been built; they are never stored.
///
/// # Examples
///
/// ```
/// use ips_client::auth::Credentials;
/// use ips_client::ValidationError;
///
/// assert!(Credentials::new("guard", "s3cret").is_ok());
/// assert_eq!(
///     Credentials::new("", "s3cret").unwrap_err(),
///     ValidationError::EmptyUsername
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUsername`] or
    /// [`ValidationError::EmptyPassword`] if either field is empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }

        Ok(Self { username, password })
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Builds the JSON login body, consuming the credentials.
    pub(crate) fn into_login_body(self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username,
            "password": self.password,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque session identifier returned by a successful login.
///
/// The backend calls this `user_id`. It is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one login attempt.
///
/// A session id exists only on [`AuthResult::Success`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    /// The backend accepted the credentials.
    Success {
        /// Identifier to carry into the polling phase.
        session_id: SessionId,
    },
    /// The backend answered but did not confirm the login.
    InvalidCredentials,
    /// No usable answer: connection error, timeout, non-2xx status or a
    /// malformed body.
    TransportFailure,
}

impl AuthResult {
    /// Returns `true` for [`AuthResult::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the session id on success.
    #[must_use]
    pub fn session_id(&self) -> Option<&SessionId> {
        match self {
            Self::Success { session_id } => Some(session_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_reject_empty_password() {
        assert_eq!(
            Credentials::new("guard", "").unwrap_err(),
            ValidationError::EmptyPassword
        );
    }

    #[test]
    fn credentials_reject_both_empty_as_username() {
        assert_eq!(
            Credentials::new("", "").unwrap_err(),
            ValidationError::EmptyUsername
        );
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials::new("guard", "hunter2").unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("guard"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn login_body_shape() {
        let body = Credentials::new("guard", "hunter2")
            .unwrap()
            .into_login_body();
        assert_eq!(
            body,
            serde_json::json!({"username": "guard", "password": "hunter2"})
        );
    }

    #[test]
    fn auth_result_accessors() {
        let ok = AuthResult::Success {
            session_id: SessionId::new("u1"),
        };
        assert!(ok.is_success());
        assert_eq!(ok.session_id().map(SessionId::as_str), Some("u1"));

        assert!(!AuthResult::InvalidCredentials.is_success());
        assert_eq!(AuthResult::TransportFailure.session_id(), None);
    }
}
