// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor telemetry exchanged with the backend.
//!
//! The backend stores readings pushed by a field sensor node and serves the
//! latest one from `GET /sensor-data`. Every value on the wire is
//! string-typed, booleans included (`"true"` / `"false"`):
//!
//! ```json
//! {
//!   "temperature": "24.5",
//!   "gas_level": "12",
//!   "light_intensity": "true",
//!   "fire_detected": "false",
//!   "fan_status": "true",
//!   "led_status": "false"
//! }
//! ```
//!
//! - [`SensorSnapshot`] - Tolerant parse of one status payload
//! - [`RenderedSnapshot`] - Display strings for a dashboard
//! - [`SensorReading`] - Payload for `POST /upload_data`

mod reading;
mod render;
mod snapshot;

pub use reading::{SensorReading, SensorReadingBuilder};
pub use render::RenderedSnapshot;
pub use snapshot::{SensorSnapshot, UNKNOWN};

/// Wire field names.
pub(crate) mod fields {
    pub const TEMPERATURE: &str = "temperature";
    pub const GAS_LEVEL: &str = "gas_level";
    pub const LIGHT_INTENSITY: &str = "light_intensity";
    pub const FIRE_DETECTED: &str = "fire_detected";
    pub const FAN_STATUS: &str = "fan_status";
    pub const LED_STATUS: &str = "led_status";
}
