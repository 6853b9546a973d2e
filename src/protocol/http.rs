// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the protection system backend.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::ProtocolError;
use crate::protocol::{HttpResponse, JSON_CONTENT_TYPE, Transport};

// ============================================================================
// HttpConfig
// ============================================================================

/// Connection parameters for the backend.
///
/// HTTPS is the default. Plain HTTP is only meant for local test servers.
///
/// # Examples
///
/// ```
/// use ips_client::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Production backend over HTTPS
/// let config = HttpConfig::new("ips-backend.example.com");
/// assert_eq!(config.base_url(), "https://ips-backend.example.com");
///
/// // Local development server
/// let config = HttpConfig::new("127.0.0.1")
///     .with_plain_http()
///     .with_port(5000)
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.base_url(), "http://127.0.0.1:5000");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new configuration for the specified host.
    ///
    /// If `host` already carries an `http://` or `https://` scheme it is used
    /// verbatim as the base URL and the port/scheme settings are ignored.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_HTTPS_PORT,
            use_https: true,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Disables TLS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 80.
    #[must_use]
    pub fn with_plain_http(mut self) -> Self {
        self.use_https = false;
        if self.port == Self::DEFAULT_HTTPS_PORT {
            self.port = Self::DEFAULT_PORT;
        }
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            return self.host.trim_end_matches('/').to_string();
        }

        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let base_url = self.base_url();

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url,
            client,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for the backend.
///
/// Cloning is cheap and clones share the underlying connection pool, so one
/// client can serve the authenticator and every poll tick.
///
/// # Examples
///
/// ```no_run
/// use ips_client::protocol::{HttpClient, Transport, SENSOR_DATA_PATH};
///
/// # async fn example() -> ips_client::Result<()> {
/// let client = HttpClient::new("ips-backend.example.com")?;
/// let response = client.get(SENSOR_DATA_PATH).await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a new HTTPS client for the specified host with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the backend.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for an endpoint path.
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            // Safe: request timeouts never approach u64::MAX milliseconds
            #[allow(clippy::cast_possible_truncation)]
            let timeout_ms = self.timeout.as_millis() as u64;
            ProtocolError::Timeout(timeout_ms)
        } else if err.is_connect() {
            ProtocolError::ConnectionFailed(err.to_string())
        } else {
            ProtocolError::Http(err)
        }
    }

    async fn finish(&self, response: reqwest::Response) -> Result<HttpResponse, ProtocolError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e))?;

        tracing::debug!(status = status.as_u16(), body = %body, "Received HTTP response");

        if !status.is_success() {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        Ok(HttpResponse::new(status.as_u16(), body))
    }
}

impl Transport for HttpClient {
    async fn get(&self, path: &str) -> Result<HttpResponse, ProtocolError> {
        let url = self.build_url(path);

        tracing::debug!(url = %url, "Sending HTTP GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.finish(response).await
    }

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, ProtocolError> {
        let url = self.build_url(path);

        // Body is not logged: it may carry credentials.
        tracing::debug!(url = %url, "Sending HTTP POST");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.finish(response).await
    }
}

/// Extracts the `error` or `message` field from an error body, if any.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key)?.as_str().map(ToString::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_paths() {
        let client = HttpClient::new("ips.example.com").unwrap();
        assert_eq!(
            client.build_url("/sensor-data"),
            "https://ips.example.com/sensor-data"
        );
        assert_eq!(client.build_url("login"), "https://ips.example.com/login");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let client = HttpClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn empty_host_is_rejected() {
        let result = HttpConfig::new("  ").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn server_message_prefers_error_field() {
        assert_eq!(
            server_message(r#"{"error": "'led_status' is required"}"#).as_deref(),
            Some("'led_status' is required")
        );
        assert_eq!(
            server_message(r#"{"message": "No data available"}"#).as_deref(),
            Some("No data available")
        );
        assert_eq!(server_message("Internal Server Error"), None);
    }

    // =========================================================================
    // HttpConfig tests
    // =========================================================================

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("ips.example.com");
        assert_eq!(config.host(), "ips.example.com");
        assert_eq!(config.port(), 443);
        assert!(config.use_https());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn http_config_with_plain_http() {
        let config = HttpConfig::new("10.0.0.5").with_plain_http();
        assert!(!config.use_https());
        assert_eq!(config.port(), 80);
        assert_eq!(config.base_url(), "http://10.0.0.5");
    }

    #[test]
    fn http_config_plain_http_keeps_custom_port() {
        let config = HttpConfig::new("10.0.0.5")
            .with_port(5000)
            .with_plain_http();
        assert_eq!(config.port(), 5000);
        assert_eq!(config.base_url(), "http://10.0.0.5:5000");
    }

    #[test]
    fn http_config_base_url_https_custom_port() {
        let config = HttpConfig::new("ips.example.com").with_port(8443);
        assert_eq!(config.base_url(), "https://ips.example.com:8443");
    }

    #[test]
    fn http_config_with_timeout() {
        let config = HttpConfig::new("ips.example.com").with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn http_config_into_client() {
        let client = HttpConfig::new("ips.example.com").into_client().unwrap();
        assert_eq!(client.base_url(), "https://ips.example.com");
    }
}
