// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for `GET /sensor-data` payloads.

use serde::Serialize;
use serde_json::{Map, Value};

use super::fields;
use crate::error::ParseError;
use crate::protocol::HttpResponse;

/// Sentinel used for any field the server did not send.
pub const UNKNOWN: &str = "N/A";

/// One parsed status payload.
///
/// Parsing never fails because a field is missing: absent fields fall back
/// to [`UNKNOWN`], and a boolean field is `true` only when its wire value is
/// exactly `"true"`. Each poll produces a fresh snapshot that replaces the
/// previous one as a whole.
///
/// # Examples
///
/// ```
/// use ips_client::telemetry::{SensorSnapshot, UNKNOWN};
///
/// let snapshot = SensorSnapshot::from_json(r#"{"fire_detected":"true"}"#).unwrap();
/// assert!(snapshot.fire_detected());
/// assert_eq!(snapshot.temperature(), UNKNOWN);
/// assert!(!snapshot.fan_on());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorSnapshot {
    temperature: String,
    gas_level: String,
    light_intensity_low: bool,
    fire_detected: bool,
    fan_on: bool,
    led_on: bool,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            temperature: UNKNOWN.to_string(),
            gas_level: UNKNOWN.to_string(),
            light_intensity_low: false,
            fire_detected: false,
            fan_on: false,
            led_on: false,
        }
    }
}

impl SensorSnapshot {
    /// Parses a status payload.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not JSON or is not a JSON object.
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        HttpResponse::new(200, body)
            .json_object()
            .map(|object| Self::from_object(&object))
    }

    /// Builds a snapshot from an already decoded JSON object.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            temperature: opt_string(object, fields::TEMPERATURE),
            gas_level: opt_string(object, fields::GAS_LEVEL),
            light_intensity_low: opt_flag(object, fields::LIGHT_INTENSITY),
            fire_detected: opt_flag(object, fields::FIRE_DETECTED),
            fan_on: opt_flag(object, fields::FAN_STATUS),
            led_on: opt_flag(object, fields::LED_STATUS),
        }
    }

    /// Temperature as sent by the server, or [`UNKNOWN`].
    #[must_use]
    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    /// Gas level as sent by the server, or [`UNKNOWN`].
    #[must_use]
    pub fn gas_level(&self) -> &str {
        &self.gas_level
    }

    /// Raw `light_intensity` flag. Rendered as `LOW` when set.
    #[must_use]
    pub fn light_intensity_low(&self) -> bool {
        self.light_intensity_low
    }

    /// Whether the fire sensor triggered.
    #[must_use]
    pub fn fire_detected(&self) -> bool {
        self.fire_detected
    }

    /// Whether the fan actuator is on.
    #[must_use]
    pub fn fan_on(&self) -> bool {
        self.fan_on
    }

    /// Whether the LED actuator is on.
    #[must_use]
    pub fn led_on(&self) -> bool {
        self.led_on
    }
}

/// Reads `key` with optional-string semantics.
///
/// Strings are taken verbatim; numbers and booleans as their JSON text;
/// `null` or absence yields [`UNKNOWN`].
fn opt_string(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn opt_flag(object: &Map<String, Value>, key: &str) -> bool {
    opt_string(object, key) == "true"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_payload() {
        let json = r#"{
            "temperature": "24.5",
            "gas_level": "12",
            "light_intensity": "true",
            "fire_detected": "false",
            "fan_status": "true",
            "led_status": "false"
        }"#;
        let snapshot = SensorSnapshot::from_json(json).unwrap();

        assert_eq!(snapshot.temperature(), "24.5");
        assert_eq!(snapshot.gas_level(), "12");
        assert!(snapshot.light_intensity_low());
        assert!(!snapshot.fire_detected());
        assert!(snapshot.fan_on());
        assert!(!snapshot.led_on());
    }

    #[test]
    fn empty_object_yields_defaults() {
        let snapshot = SensorSnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, SensorSnapshot::default());
        assert_eq!(snapshot.temperature(), UNKNOWN);
        assert_eq!(snapshot.gas_level(), UNKNOWN);
    }

    #[test]
    fn only_exact_true_sets_flags() {
        let json = r#"{"fire_detected":"TRUE","fan_status":"yes","led_status":"1","light_intensity":"N/A"}"#;
        let snapshot = SensorSnapshot::from_json(json).unwrap();
        assert!(!snapshot.fire_detected());
        assert!(!snapshot.fan_on());
        assert!(!snapshot.led_on());
        assert!(!snapshot.light_intensity_low());
    }

    #[test]
    fn native_json_values_are_stringified() {
        let json = r#"{"temperature": 23.5, "gas_level": 40, "fire_detected": true, "led_status": false}"#;
        let snapshot = SensorSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.temperature(), "23.5");
        assert_eq!(snapshot.gas_level(), "40");
        assert!(snapshot.fire_detected());
        assert!(!snapshot.led_on());
    }

    #[test]
    fn null_falls_back_to_unknown() {
        let snapshot = SensorSnapshot::from_json(r#"{"temperature": null}"#).unwrap();
        assert_eq!(snapshot.temperature(), UNKNOWN);
    }

    #[test]
    fn unrelated_fields_are_ignored() {
        let json = r#"{"id": 7, "timestamp": "Mon, 01 Jan 2024 10:00:00 GMT", "gas_level": "3"}"#;
        let snapshot = SensorSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.gas_level(), "3");
    }

    #[test]
    fn malformed_body_is_error() {
        assert!(SensorSnapshot::from_json("not json").is_err());
        assert!(matches!(
            SensorSnapshot::from_json(r#""text""#),
            Err(ParseError::NotAnObject("string"))
        ));
    }
}
