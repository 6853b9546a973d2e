// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status poller task and its stop handle.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::ReentrantMutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::PollError;
use crate::protocol::{SENSOR_DATA_PATH, Transport};
use crate::state::{PollerPhase, PollerState};
use crate::telemetry::SensorSnapshot;

/// Polls the sensor status endpoint on a fixed cadence.
///
/// See the [module documentation](crate::poller) for scheduling and
/// cancellation guarantees.
#[derive(Debug, Clone)]
pub struct StatusPoller<T> {
    transport: T,
    interval: Duration,
}

impl<T: Transport> StatusPoller<T> {
    /// Default delay between the starts of two ticks.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

    /// Creates a poller using the given transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            interval: Self::DEFAULT_INTERVAL,
        }
    }

    /// Sets the polling interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts polling and returns the handle that stops it.
    ///
    /// The first tick fires immediately. Callbacks run one at a time on the
    /// poller task and must not block.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[must_use = "dropping the handle stops the poller"]
    pub fn start<S, E>(self, on_snapshot: S, on_error: E) -> StopHandle
    where
        S: Fn(&SensorSnapshot) + Send + 'static,
        E: Fn(&PollError) + Send + 'static,
    {
        let mut initial = PollerState::new();
        initial.start();
        let (state, _) = watch::channel(initial);

        let shared = Arc::new(Shared {
            state,
            cancel: CancellationToken::new(),
            delivery: ReentrantMutex::new(()),
        });

        tracing::info!(interval = ?self.interval, "Status poller started");

        let task = tokio::spawn(run(
            self.transport,
            self.interval,
            Arc::clone(&shared),
            on_snapshot,
            on_error,
        ));

        StopHandle {
            shared,
            task: Some(task),
        }
    }
}

/// State shared between the poller task and its [`StopHandle`].
struct Shared {
    state: watch::Sender<PollerState>,
    cancel: CancellationToken,
    /// Held while a tick result is delivered and while stopping, so `stop`
    /// cannot return in the middle of a delivery. Reentrant so callbacks
    /// may stop the poller themselves.
    delivery: ReentrantMutex<()>,
}

impl Shared {
    /// Records and reports one tick outcome.
    ///
    /// Returns `false` if the poller was stopped; the outcome is then
    /// discarded.
    fn deliver<S, E>(
        &self,
        outcome: Result<SensorSnapshot, PollError>,
        on_snapshot: &S,
        on_error: &E,
    ) -> bool
    where
        S: Fn(&SensorSnapshot),
        E: Fn(&PollError),
    {
        let _gate = self.delivery.lock();

        if self.cancel.is_cancelled() {
            tracing::debug!("Discarding tick result after stop");
            return false;
        }

        match outcome {
            Ok(snapshot) => {
                self.state
                    .send_modify(|state| state.record_snapshot(snapshot.clone()));
                on_snapshot(&snapshot);
            }
            Err(error) => {
                tracing::warn!(error = %error, "Sensor data poll failed");
                self.state.send_modify(|state| state.record_error(error.clone()));
                on_error(&error);
            }
        }

        true
    }

    fn stop(&self) {
        let _gate = self.delivery.lock();
        self.cancel.cancel();
        if self.state.send_if_modified(PollerState::stop) {
            tracing::info!("Status poller stopped");
        }
    }
}

async fn run<T, S, E>(
    transport: T,
    interval: Duration,
    shared: Arc<Shared>,
    on_snapshot: S,
    on_error: E,
) where
    T: Transport,
    S: Fn(&SensorSnapshot),
    E: Fn(&PollError),
{
    loop {
        let tick_started = Instant::now();

        let outcome = tokio::select! {
            biased;
            () = shared.cancel.cancelled() => break,
            outcome = fetch_snapshot(&transport) => outcome,
        };

        if !shared.deliver(outcome, &on_snapshot, &on_error) {
            break;
        }

        tokio::select! {
            biased;
            () = shared.cancel.cancelled() => break,
            () = tokio::time::sleep_until(next_tick(tick_started, interval)) => {}
        }
    }

    tracing::debug!("Status poller task exited");
}

/// Roughly 30 years; the same horizon tokio uses for unbounded sleeps.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Deadline of the tick following one started at `tick_started`.
///
/// An interval too large to add to the clock parks the loop until stopped.
fn next_tick(tick_started: Instant, interval: Duration) -> Instant {
    tick_started
        .checked_add(interval)
        .unwrap_or_else(|| Instant::now() + FAR_FUTURE)
}

async fn fetch_snapshot<T: Transport>(transport: &T) -> Result<SensorSnapshot, PollError> {
    tracing::debug!("Polling sensor data");
    let response = transport.get(SENSOR_DATA_PATH).await?;
    let object = response.json_object()?;
    Ok(SensorSnapshot::from_object(&object))
}

/// Handle to a running [`StatusPoller`].
///
/// Stopping is idempotent. Dropping the handle stops the poller.
pub struct StopHandle {
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl StopHandle {
    /// Stops the poller.
    ///
    /// After this returns no callback will run again. If a callback is
    /// running on another thread, this waits for it to finish.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Stops the poller and waits for its task to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Status poller task ended abnormally");
            }
        }
    }

    /// Returns `true` once the poller has been stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.shared.state.borrow().phase() == PollerPhase::Stopped
    }

    /// Returns a copy of the current poller state.
    #[must_use]
    pub fn state(&self) -> PollerState {
        self.shared.state.borrow().clone()
    }

    /// Subscribes to poller state updates.
    ///
    /// Do not hold a [`watch::Ref`] from the receiver across a call to
    /// [`stop`](Self::stop): stopping writes the state while holding the
    /// delivery gate, and a delivery in progress writes it too, so the
    /// outstanding read lock can deadlock both.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PollerState> {
        self.shared.state.subscribe()
    }
}

impl Drop for StopHandle {
    fn drop(&mut self) {
        self.shared.stop();
    }
}

impl std::fmt::Debug for StopHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopHandle")
            .field("phase", &self.shared.state.borrow().phase())
            .finish_non_exhaustive()
    }
}
