// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session authenticator.

use serde_json::Value;

use crate::auth::{AuthResult, Credentials, SessionId};
use crate::protocol::{HttpResponse, LOGIN_PATH, Transport};

/// Message the backend sends when a login is accepted.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

/// Exchanges credentials for a session id with one `POST /login`.
///
/// The authenticator never retries and never stores the session id;
/// both are the caller's decision.
///
/// # Examples
///
/// ```no_run
/// use ips_client::auth::{AuthResult, Credentials, SessionAuthenticator};
/// use ips_client::protocol::HttpClient;
///
/// # async fn example() -> ips_client::Result<()> {
/// let authenticator = SessionAuthenticator::new(HttpClient::new("ips.example.com")?);
/// let credentials = Credentials::new("guard", "s3cret")?;
///
/// match authenticator.authenticate(credentials).await {
///     AuthResult::Success { session_id } => println!("logged in as {session_id}"),
///     AuthResult::InvalidCredentials => println!("Invalid credentials"),
///     AuthResult::TransportFailure => println!("Login failed. Please try again."),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SessionAuthenticator<T> {
    transport: T,
}

impl<T: Transport> SessionAuthenticator<T> {
    /// Creates an authenticator using the given transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs one login attempt.
    ///
    /// Any failure to obtain a well-formed 2xx answer, including an HTTP
    /// error status, yields [`AuthResult::TransportFailure`].
    pub async fn authenticate(&self, credentials: Credentials) -> AuthResult {
        let username = credentials.username().to_string();
        let body = credentials.into_login_body();

        let result = match self.transport.post_json(LOGIN_PATH, &body).await {
            Ok(response) => interpret_login_response(&response),
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Login request failed");
                AuthResult::TransportFailure
            }
        };

        match &result {
            AuthResult::Success { session_id } => {
                tracing::info!(username = %username, session_id = %session_id, "Login successful");
            }
            AuthResult::InvalidCredentials => {
                tracing::info!(username = %username, "Login rejected");
            }
            AuthResult::TransportFailure => {}
        }

        result
    }
}

/// Maps a 2xx login response to an [`AuthResult`].
fn interpret_login_response(response: &HttpResponse) -> AuthResult {
    let object = match response.json_object() {
        Ok(object) => object,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed login response");
            return AuthResult::TransportFailure;
        }
    };

    let Some(message) = object.get("message") else {
        tracing::warn!("Login response has no message field");
        return AuthResult::TransportFailure;
    };

    if message.as_str() != Some(LOGIN_SUCCESS_MESSAGE) {
        return AuthResult::InvalidCredentials;
    }

    // The backend emits the database id, usually as a number.
    match object.get("user_id") {
        Some(Value::String(id)) => AuthResult::Success {
            session_id: SessionId::new(id.clone()),
        },
        Some(Value::Number(id)) => AuthResult::Success {
            session_id: SessionId::new(id.to_string()),
        },
        _ => {
            tracing::warn!("Login succeeded without a usable user_id");
            AuthResult::TransportFailure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(body: &str) -> AuthResult {
        interpret_login_response(&HttpResponse::new(200, body))
    }

    #[test]
    fn success_with_string_id() {
        assert_eq!(
            interpret(r#"{"message":"Login successful","user_id":"u1"}"#),
            AuthResult::Success {
                session_id: SessionId::new("u1")
            }
        );
    }

    #[test]
    fn success_with_numeric_id() {
        assert_eq!(
            interpret(r#"{"message":"Login successful","user_id":42}"#),
            AuthResult::Success {
                session_id: SessionId::new("42")
            }
        );
    }

    #[test]
    fn other_message_is_invalid_credentials() {
        assert_eq!(
            interpret(r#"{"message":"bad"}"#),
            AuthResult::InvalidCredentials
        );
        assert_eq!(
            interpret(r#"{"message":"login successful","user_id":"u1"}"#),
            AuthResult::InvalidCredentials
        );
    }

    #[test]
    fn missing_message_is_transport_failure() {
        assert_eq!(interpret(r#"{"user_id":"u1"}"#), AuthResult::TransportFailure);
    }

    #[test]
    fn success_without_id_is_transport_failure() {
        assert_eq!(
            interpret(r#"{"message":"Login successful"}"#),
            AuthResult::TransportFailure
        );
        assert_eq!(
            interpret(r#"{"message":"Login successful","user_id":null}"#),
            AuthResult::TransportFailure
        );
    }

    #[test]
    fn non_json_is_transport_failure() {
        assert_eq!(interpret("OK"), AuthResult::TransportFailure);
        assert_eq!(interpret(r#"["Login successful"]"#), AuthResult::TransportFailure);
    }
}
