// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ips_client` - Async client for the Institute Protection System backend.
//!
//! The backend collects readings from a field sensor node (temperature, gas
//! level, light intensity, fire detection) and the state of two actuators
//! (fan, LED). This library logs a user in and then keeps a live view of the
//! latest reading by polling.
//!
//! # Features
//!
//! - **Login**: one `POST /login` exchange yielding an opaque session id
//! - **Live status**: fixed-cadence polling of `GET /sensor-data` that
//!   survives any number of transient failures
//! - **Presentation mapping**: dashboard strings for every reading
//! - **Upload**: push a reading to `POST /upload_data`
//!
//! # Quick Start
//!
//! ```no_run
//! use ips_client::MonitorClient;
//! use ips_client::telemetry::RenderedSnapshot;
//!
//! #[tokio::main]
//! async fn main() -> ips_client::Result<()> {
//!     let client = MonitorClient::connect("ips-backend.example.com")?;
//!
//!     let result = client.login("guard", "s3cret").await?;
//!     let Some(session) = client.open_session(&result) else {
//!         eprintln!("Login failed. Please try again.");
//!         return Ok(());
//!     };
//!
//!     let handle = session.poller().start(
//!         |snapshot| println!("{}", RenderedSnapshot::from(snapshot)),
//!         |error| eprintln!("Failed to fetch data: {error}"),
//!     );
//!
//!     tokio::signal::ctrl_c().await.ok();
//!     handle.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! # Lower-level API
//!
//! [`SessionAuthenticator`] and [`StatusPoller`] can be used on their own
//! with any [`Transport`](protocol::Transport), which is how the polling
//! logic is tested without a network.

pub mod auth;
mod client;
pub mod error;
pub mod poller;
pub mod protocol;
pub mod state;
pub mod telemetry;

pub use auth::{AuthResult, Credentials, SessionAuthenticator, SessionId};
pub use client::{MonitorClient, Session};
pub use error::{Error, ErrorKind, ParseError, PollError, ProtocolError, Result, ValidationError};
pub use poller::{StatusPoller, StopHandle};
pub use protocol::{HttpClient, HttpConfig};
pub use state::{PollerPhase, PollerState};
pub use telemetry::{RenderedSnapshot, SensorReading, SensorSnapshot};
