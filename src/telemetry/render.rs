// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display strings for a dashboard.

use std::fmt;

use serde::Serialize;

use super::SensorSnapshot;

/// Dashboard text for one [`SensorSnapshot`].
///
/// The light mapping is inverted relative to the raw flag: a
/// `light_intensity` of `"true"` renders as `LOW`.
///
/// # Examples
///
/// ```
/// use ips_client::telemetry::{RenderedSnapshot, SensorSnapshot};
///
/// let snapshot = SensorSnapshot::from_json(
///     r#"{"temperature":"22","fire_detected":"true","light_intensity":"false"}"#,
/// ).unwrap();
/// let view = RenderedSnapshot::from(&snapshot);
///
/// assert_eq!(view.temperature, "22C");
/// assert_eq!(view.fire, "YES");
/// assert_eq!(view.light, "HIGH");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSnapshot {
    /// Temperature followed by `C`.
    pub temperature: String,
    /// Gas level followed by `%`.
    pub gas_level: String,
    /// `LOW` or `HIGH`.
    pub light: &'static str,
    /// `YES` or `NO`.
    pub fire: &'static str,
    /// `ON` or `OFF`.
    pub fan: &'static str,
    /// `ON` or `OFF`.
    pub led: &'static str,
}

impl From<&SensorSnapshot> for RenderedSnapshot {
    fn from(snapshot: &SensorSnapshot) -> Self {
        Self {
            temperature: format!("{}C", snapshot.temperature()),
            gas_level: format!("{}%", snapshot.gas_level()),
            light: if snapshot.light_intensity_low() {
                "LOW"
            } else {
                "HIGH"
            },
            fire: if snapshot.fire_detected() { "YES" } else { "NO" },
            fan: on_off(snapshot.fan_on()),
            led: on_off(snapshot.led_on()),
        }
    }
}

impl fmt::Display for RenderedSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "temp={} gas={} light={} fire={} fan={} led={}",
            self.temperature, self.gas_level, self.light, self.fire, self.fan, self.led
        )
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_all_on() {
        let snapshot = SensorSnapshot::from_json(
            r#"{"temperature":"30","gas_level":"55","light_intensity":"true",
                "fire_detected":"true","fan_status":"true","led_status":"true"}"#,
        )
        .unwrap();
        let view = RenderedSnapshot::from(&snapshot);

        assert_eq!(view.temperature, "30C");
        assert_eq!(view.gas_level, "55%");
        assert_eq!(view.light, "LOW");
        assert_eq!(view.fire, "YES");
        assert_eq!(view.fan, "ON");
        assert_eq!(view.led, "ON");
    }

    #[test]
    fn render_defaults() {
        let view = RenderedSnapshot::from(&SensorSnapshot::default());

        assert_eq!(view.temperature, "N/AC");
        assert_eq!(view.gas_level, "N/A%");
        assert_eq!(view.light, "HIGH");
        assert_eq!(view.fire, "NO");
        assert_eq!(view.fan, "OFF");
        assert_eq!(view.led, "OFF");
    }

    #[test]
    fn display_line() {
        let view = RenderedSnapshot::from(&SensorSnapshot::default());
        assert_eq!(
            view.to_string(),
            "temp=N/AC gas=N/A% light=HIGH fire=NO fan=OFF led=OFF"
        );
    }
}
