// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poller phase and last-known results.

use chrono::{DateTime, Utc};

use crate::error::{ErrorKind, PollError};
use crate::telemetry::SensorSnapshot;

/// Lifecycle phase of a status poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PollerPhase {
    /// Created but not started.
    #[default]
    Idle,
    /// Ticking.
    Running,
    /// Stopped for good.
    Stopped,
}

/// Observable state of a status poller.
///
/// A failed tick records its error but leaves the last snapshot in place.
/// A successful tick replaces the snapshot as a whole and clears the
/// consecutive failure count; it does not clear `last_error`, which keeps
/// the most recent failure for display.
///
/// # Examples
///
/// ```
/// use ips_client::state::{PollerPhase, PollerState};
///
/// let state = PollerState::new();
/// assert_eq!(state.phase(), PollerPhase::Idle);
/// assert!(state.last_snapshot().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollerState {
    phase: PollerPhase,
    last_snapshot: Option<SensorSnapshot>,
    last_error: Option<PollError>,
    last_updated: Option<DateTime<Utc>>,
    ticks: u64,
    consecutive_failures: u32,
}

impl PollerState {
    /// Creates a new idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> PollerPhase {
        self.phase
    }

    /// Returns the most recent successfully parsed snapshot.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&SensorSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Returns the most recent tick error.
    #[must_use]
    pub fn last_error(&self) -> Option<&PollError> {
        self.last_error.as_ref()
    }

    /// Returns the category of the most recent tick error.
    #[must_use]
    pub fn last_error_kind(&self) -> Option<ErrorKind> {
        self.last_error.as_ref().map(PollError::kind)
    }

    /// Returns when the last snapshot was accepted.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Returns the number of completed ticks.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns the number of failed ticks since the last success.
    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Returns `true` while the poller is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == PollerPhase::Running
    }

    // ========== Transitions ==========

    /// Moves `Idle` to `Running`. Returns `false` in any other phase.
    pub(crate) fn start(&mut self) -> bool {
        if self.phase != PollerPhase::Idle {
            return false;
        }
        self.phase = PollerPhase::Running;
        true
    }

    /// Moves to `Stopped`. Returns `false` if already stopped.
    pub(crate) fn stop(&mut self) -> bool {
        if self.phase == PollerPhase::Stopped {
            return false;
        }
        self.phase = PollerPhase::Stopped;
        true
    }

    pub(crate) fn record_snapshot(&mut self, snapshot: SensorSnapshot) {
        self.last_snapshot = Some(snapshot);
        self.last_updated = Some(Utc::now());
        self.consecutive_failures = 0;
        self.ticks += 1;
    }

    pub(crate) fn record_error(&mut self, error: PollError) {
        self.last_error = Some(error);
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_transitions() {
        let mut state = PollerState::new();
        assert!(state.start());
        assert!(state.is_running());
        assert!(!state.start());

        assert!(state.stop());
        assert_eq!(state.phase(), PollerPhase::Stopped);
        assert!(!state.stop());
        assert!(!state.start());
    }

    #[test]
    fn stop_from_idle() {
        let mut state = PollerState::new();
        assert!(state.stop());
        assert!(!state.start());
    }

    #[test]
    fn error_keeps_snapshot() {
        let mut state = PollerState::new();
        state.record_snapshot(SensorSnapshot::default());
        state.record_error(PollError::Server { status: 500 });

        assert!(state.last_snapshot().is_some());
        assert_eq!(state.last_error_kind(), Some(ErrorKind::Server));
        assert_eq!(state.consecutive_failures(), 1);
        assert_eq!(state.ticks(), 2);
    }

    #[test]
    fn snapshot_resets_failure_count() {
        let mut state = PollerState::new();
        state.record_error(PollError::Network("refused".to_string()));
        state.record_error(PollError::Network("refused".to_string()));
        assert_eq!(state.consecutive_failures(), 2);
        assert!(state.last_updated().is_none());

        state.record_snapshot(SensorSnapshot::default());
        assert_eq!(state.consecutive_failures(), 0);
        assert!(state.last_updated().is_some());
        assert_eq!(state.last_error_kind(), Some(ErrorKind::Network));
    }
}
