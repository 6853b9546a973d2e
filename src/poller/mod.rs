// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic sensor status polling.
//!
//! A [`StatusPoller`] fetches `GET /sensor-data` once immediately and then
//! on a fixed cadence (3 seconds by default) until stopped. Each tick ends in
//! exactly one callback: the snapshot callback on success, the error callback
//! otherwise. Errors never end the loop.
//!
//! # Scheduling
//!
//! Ticks are strictly serialized: the next fetch is issued only after the
//! current one has completed and been delivered, and no earlier than one
//! interval after the current tick began. A response slower than the interval
//! therefore delays the next tick instead of overlapping it.
//!
//! # Cancellation
//!
//! [`StopHandle::stop`] may be called from any thread, including from inside
//! a callback. Once it returns, no further callback runs, even if a fetch
//! was still in flight. Dropping the handle stops the poller as well.
//!
//! ```no_run
//! use ips_client::poller::StatusPoller;
//! use ips_client::protocol::HttpClient;
//! use ips_client::telemetry::RenderedSnapshot;
//!
//! # async fn example() -> ips_client::Result<()> {
//! let poller = StatusPoller::new(HttpClient::new("ips.example.com")?);
//! let handle = poller.start(
//!     |snapshot| println!("{}", RenderedSnapshot::from(snapshot)),
//!     |error| eprintln!("Failed to fetch data: {error}"),
//! );
//!
//! tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//! handle.stop();
//! # Ok(())
//! # }
//! ```

mod status_poller;

pub use status_poller::{StatusPoller, StopHandle};
