// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for talking to the protection system backend.
//!
//! The backend exposes a small JSON-over-HTTPS API:
//!
//! | Method | Path           | Purpose                             |
//! |--------|----------------|-------------------------------------|
//! | POST   | `/login`       | Exchange credentials for a user id  |
//! | GET    | `/sensor-data` | Latest stored sensor reading        |
//! | POST   | `/upload_data` | Store a reading from a sensor node  |
//!
//! [`HttpClient`] is the production [`Transport`]. Every component that
//! talks to the backend is generic over [`Transport`] so the same client
//! (and its connection pool) can be shared, and so tests can script
//! responses without a network.

mod http;

use std::future::Future;

pub use http::{HttpClient, HttpConfig};

use crate::error::{ParseError, ProtocolError};

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/login";
/// Path of the sensor status endpoint.
pub const SENSOR_DATA_PATH: &str = "/sensor-data";
/// Path of the reading upload endpoint.
pub const UPLOAD_DATA_PATH: &str = "/upload_data";

/// Content type sent with every JSON request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// A successful (2xx) response from the backend.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    body: String,
}

impl HttpResponse {
    /// Creates a new response with the given status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the body as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not JSON, or is JSON but not an object.
    pub fn json_object(&self) -> Result<serde_json::Map<String, serde_json::Value>, ParseError> {
        match serde_json::from_str(&self.body)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(ParseError::NotAnObject(json_type_name(&other))),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Trait for transports that can reach the backend.
///
/// Implementations return `Ok` only for 2xx answers. A non-2xx answer is
/// reported as [`ProtocolError::Status`], anything that prevented an answer
/// (connect error, timeout, DNS) as one of the other variants.
pub trait Transport: Send + Sync + 'static {
    /// Issues a GET request for `path`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the status is not 2xx.
    fn get(&self, path: &str) -> impl Future<Output = Result<HttpResponse, ProtocolError>> + Send;

    /// Issues a POST request for `path` with a JSON body.
    ///
    /// The body is sent with content type [`JSON_CONTENT_TYPE`].
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the status is not 2xx.
    fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpResponse, ProtocolError>> + Send;
}
