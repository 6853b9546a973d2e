// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `ips_client` library.
//!
//! Failures are split by concern: local input validation, transport
//! communication, and payload parsing. The per-tick error reported by the
//! status poller is a separate, cloneable [`PollError`] because it is stored
//! in [`PollerState`](crate::state::PollerState) and handed to callbacks.
//!
//! Authentication outcomes are not errors. A rejected login is a regular
//! [`AuthResult`](crate::auth::AuthResult) value.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Local input was rejected before any request was sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error occurred during HTTP communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors raised by local input checks.
///
/// None of these ever reach the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The username was empty.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The password was empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// A sensor reading is missing one of its required fields.
    #[error("reading field '{0}' is required")]
    MissingReadingField(&'static str),
}

/// Errors related to HTTP communication with the backend.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}{}", .message.as_deref().map(|m| format!(" - {m}")).unwrap_or_default())]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Server-provided error message, if any.
        message: Option<String>,
    },

    /// Connection to the backend failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl ProtocolError {
    /// Returns the HTTP status if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors related to parsing backend responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body was valid JSON but not an object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Category of a polling failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connectivity problem, timeout or DNS failure.
    Network,
    /// The server answered with a non-2xx status.
    Server,
    /// The status payload could not be parsed.
    Parse,
}

/// Error reported for a single failed poll tick.
///
/// Poll errors never stop the loop; they are reported through the poller's
/// error callback and recorded as the last error in the poller state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    /// The request did not complete.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("server error: HTTP {status}")]
    Server {
        /// The HTTP status code.
        status: u16,
    },

    /// The body was not a JSON object.
    #[error("parse error: {0}")]
    Parse(String),
}

impl PollError {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Server { .. } => ErrorKind::Server,
            Self::Parse(_) => ErrorKind::Parse,
        }
    }
}

impl From<ProtocolError> for PollError {
    fn from(err: ProtocolError) -> Self {
        match err.status() {
            Some(status) => Self::Server { status },
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<ParseError> for PollError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        assert_eq!(
            ValidationError::EmptyUsername.to_string(),
            "username must not be empty"
        );
        assert_eq!(
            ValidationError::MissingReadingField("gas_level").to_string(),
            "reading field 'gas_level' is required"
        );
    }

    #[test]
    fn error_from_validation_error() {
        let err: Error = ValidationError::EmptyPassword.into();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyPassword)
        ));
    }

    #[test]
    fn status_error_display() {
        let err = ProtocolError::Status {
            status: 404,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 404");

        let err = ProtocolError::Status {
            status: 400,
            message: Some("'gas_level' is required".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 400 - 'gas_level' is required");
    }

    #[test]
    fn poll_error_from_status_is_server() {
        let err = PollError::from(ProtocolError::Status {
            status: 503,
            message: None,
        });
        assert_eq!(err, PollError::Server { status: 503 });
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[test]
    fn poll_error_from_transport_is_network() {
        let err = PollError::from(ProtocolError::Timeout(10_000));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.to_string(), "network error: request timed out after 10000 ms");
    }

    #[test]
    fn poll_error_from_parse_error() {
        let err = PollError::from(ParseError::NotAnObject("array"));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
