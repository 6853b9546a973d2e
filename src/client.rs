// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client facade tying login and polling together.
//!
//! The only way to start polling through this facade is with a [`Session`],
//! and the only way to get a [`Session`] is from a successful login:
//!
//! ```text
//! MonitorClient --login--> AuthResult::Success --open_session--> Session --poller--> StatusPoller
//! ```

use std::time::Duration;

use crate::auth::{AuthResult, Credentials, SessionAuthenticator, SessionId};
use crate::error::{ParseError, ValidationError};
use crate::poller::StatusPoller;
use crate::protocol::{HttpClient, HttpConfig, Transport, UPLOAD_DATA_PATH};
use crate::telemetry::SensorReading;

/// Entry point for talking to the backend.
///
/// One transport is shared by the login exchange, every poll tick and
/// uploads.
///
/// # Examples
///
/// ```no_run
/// use ips_client::MonitorClient;
/// use ips_client::telemetry::RenderedSnapshot;
///
/// # async fn example() -> ips_client::Result<()> {
/// let client = MonitorClient::connect("ips-backend.example.com")?;
///
/// let result = client.login("guard", "s3cret").await?;
/// let Some(session) = client.open_session(&result) else {
///     println!("Login failed: {result:?}");
///     return Ok(());
/// };
///
/// let handle = session.poller().start(
///     |snapshot| println!("{}", RenderedSnapshot::from(snapshot)),
///     |error| eprintln!("{error}"),
/// );
/// # drop(handle);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MonitorClient<T = HttpClient> {
    transport: T,
    poll_interval: Duration,
}

impl MonitorClient<HttpClient> {
    /// Creates a client for `host` over HTTPS with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn connect(host: impl Into<String>) -> crate::Result<Self> {
        Self::with_config(HttpConfig::new(host))
    }

    /// Creates a client from an explicit HTTP configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn with_config(config: HttpConfig) -> crate::Result<Self> {
        Ok(Self::new(config.into_client()?))
    }
}

impl<T: Transport + Clone> MonitorClient<T> {
    /// Creates a client over an existing transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            poll_interval: StatusPoller::<T>::DEFAULT_INTERVAL,
        }
    }

    /// Sets the interval used by pollers created from this client's sessions.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Returns the shared transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns an authenticator sharing this client's transport.
    #[must_use]
    pub fn authenticator(&self) -> SessionAuthenticator<T> {
        SessionAuthenticator::new(self.transport.clone())
    }

    /// Validates the input and performs one login attempt.
    ///
    /// Empty input is rejected locally and never reaches the network.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the username or password is empty.
    /// Network and server failures are reported as
    /// [`AuthResult::TransportFailure`], not as errors.
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<AuthResult, ValidationError> {
        let credentials = Credentials::new(username, password).inspect_err(|e| {
            tracing::debug!(error = %e, "Login input rejected");
        })?;
        Ok(self.authenticator().authenticate(credentials).await)
    }

    /// Opens a session from a successful login.
    ///
    /// Returns `None` for any other outcome.
    #[must_use]
    pub fn open_session(&self, result: &AuthResult) -> Option<Session<T>> {
        result.session_id().map(|id| Session {
            id: id.clone(),
            transport: self.transport.clone(),
            poll_interval: self.poll_interval,
        })
    }

    /// Uploads one sensor reading to `POST /upload_data`.
    ///
    /// Not retried.
    ///
    /// # Errors
    ///
    /// Returns a protocol error if the request fails or the server answers
    /// with a non-2xx status; the server's `error` message is carried in
    /// [`ProtocolError::Status`](crate::ProtocolError::Status).
    pub async fn upload_reading(&self, reading: &SensorReading) -> crate::Result<()> {
        let body = serde_json::to_value(reading).map_err(ParseError::Json)?;
        self.transport.post_json(UPLOAD_DATA_PATH, &body).await?;
        tracing::debug!(
            temperature = reading.temperature(),
            gas_level = reading.gas_level(),
            "Reading uploaded"
        );
        Ok(())
    }
}

/// An authenticated session.
///
/// Holds the session id returned by the backend and a handle on the shared
/// transport. The id is not sent with status requests; the backend does not
/// ask for it.
#[derive(Debug, Clone)]
pub struct Session<T = HttpClient> {
    id: SessionId,
    transport: T,
    poll_interval: Duration,
}

impl<T: Transport + Clone> Session<T> {
    /// Returns the session id.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Creates a status poller for this session.
    #[must_use]
    pub fn poller(&self) -> StatusPoller<T> {
        tracing::debug!(session_id = %self.id, "Creating status poller");
        StatusPoller::new(self.transport.clone()).with_interval(self.poll_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_session_only_on_success() {
        let client = MonitorClient::connect("ips.example.com").unwrap();

        assert!(client.open_session(&AuthResult::InvalidCredentials).is_none());
        assert!(client.open_session(&AuthResult::TransportFailure).is_none());

        let session = client
            .open_session(&AuthResult::Success {
                session_id: SessionId::new("7"),
            })
            .unwrap();
        assert_eq!(session.id().as_str(), "7");
    }

    #[test]
    fn session_poller_inherits_interval() {
        let client = MonitorClient::connect("ips.example.com")
            .unwrap()
            .with_poll_interval(Duration::from_secs(10));
        let session = client
            .open_session(&AuthResult::Success {
                session_id: SessionId::new("7"),
            })
            .unwrap();

        assert_eq!(session.poller().interval(), Duration::from_secs(10));
    }
}
