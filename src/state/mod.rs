// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State tracked by the status poller.
//!
//! [`PollerState`] is owned by the poller task and published to observers
//! through a `tokio::sync::watch` channel; observers only ever see clones.

mod poller_state;

pub use poller_state::{PollerPhase, PollerState};
