// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Readings pushed by a sensor node to `POST /upload_data`.

use serde::{Serialize, Serializer};

use super::fields;
use crate::error::ValidationError;

/// A complete reading as uploaded by a sensor node.
///
/// The server rejects uploads missing any of the six fields, so a reading
/// can only be built with all of them set. Flags go over the wire as the
/// strings `"true"` / `"false"`.
///
/// # Examples
///
/// ```
/// use ips_client::telemetry::SensorReading;
///
/// let reading = SensorReading::builder()
///     .temperature(24.5)
///     .gas_level(12)
///     .light_intensity(true)
///     .fire_detected(false)
///     .fan_status(true)
///     .led_status(false)
///     .build()
///     .unwrap();
///
/// let json = serde_json::to_value(&reading).unwrap();
/// assert_eq!(json["temperature"], "24.5");
/// assert_eq!(json["fan_status"], "true");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorReading {
    temperature: String,
    gas_level: String,
    #[serde(serialize_with = "wire_flag")]
    light_intensity: bool,
    #[serde(serialize_with = "wire_flag")]
    fire_detected: bool,
    #[serde(serialize_with = "wire_flag")]
    fan_status: bool,
    #[serde(serialize_with = "wire_flag")]
    led_status: bool,
}

impl SensorReading {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> SensorReadingBuilder {
        SensorReadingBuilder::default()
    }

    /// Returns the temperature text.
    #[must_use]
    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    /// Returns the gas level text.
    #[must_use]
    pub fn gas_level(&self) -> &str {
        &self.gas_level
    }
}

// serde's serialize_with signature requires `&bool`
#[allow(clippy::trivially_copy_pass_by_ref)]
fn wire_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "true" } else { "false" })
}

/// Builder for [`SensorReading`].
#[derive(Debug, Default, Clone)]
pub struct SensorReadingBuilder {
    temperature: Option<String>,
    gas_level: Option<String>,
    light_intensity: Option<bool>,
    fire_detected: Option<bool>,
    fan_status: Option<bool>,
    led_status: Option<bool>,
}

impl SensorReadingBuilder {
    /// Sets the temperature.
    #[must_use]
    pub fn temperature(mut self, value: impl ToString) -> Self {
        self.temperature = Some(value.to_string());
        self
    }

    /// Sets the gas level.
    #[must_use]
    pub fn gas_level(mut self, value: impl ToString) -> Self {
        self.gas_level = Some(value.to_string());
        self
    }

    /// Sets the raw light intensity flag.
    #[must_use]
    pub fn light_intensity(mut self, value: bool) -> Self {
        self.light_intensity = Some(value);
        self
    }

    /// Sets the fire detection flag.
    #[must_use]
    pub fn fire_detected(mut self, value: bool) -> Self {
        self.fire_detected = Some(value);
        self
    }

    /// Sets the fan state.
    #[must_use]
    pub fn fan_status(mut self, value: bool) -> Self {
        self.fan_status = Some(value);
        self
    }

    /// Sets the LED state.
    #[must_use]
    pub fn led_status(mut self, value: bool) -> Self {
        self.led_status = Some(value);
        self
    }

    /// Builds the reading.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingReadingField`] naming the first
    /// unset field.
    pub fn build(self) -> Result<SensorReading, ValidationError> {
        let missing = ValidationError::MissingReadingField;
        Ok(SensorReading {
            temperature: self.temperature.ok_or(missing(fields::TEMPERATURE))?,
            gas_level: self.gas_level.ok_or(missing(fields::GAS_LEVEL))?,
            light_intensity: self
                .light_intensity
                .ok_or(missing(fields::LIGHT_INTENSITY))?,
            fire_detected: self.fire_detected.ok_or(missing(fields::FIRE_DETECTED))?,
            fan_status: self.fan_status.ok_or(missing(fields::FAN_STATUS))?,
            led_status: self.led_status.ok_or(missing(fields::LED_STATUS))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> SensorReadingBuilder {
        SensorReading::builder()
            .temperature("21")
            .gas_level("4")
            .light_intensity(false)
            .fire_detected(true)
            .fan_status(false)
            .led_status(true)
    }

    #[test]
    fn serializes_flags_as_strings() {
        let reading = complete().build().unwrap();
        let json = serde_json::to_value(&reading).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "temperature": "21",
                "gas_level": "4",
                "light_intensity": "false",
                "fire_detected": "true",
                "fan_status": "false",
                "led_status": "true"
            })
        );
    }

    #[test]
    fn missing_field_is_reported() {
        let err = SensorReading::builder()
            .temperature(20)
            .light_intensity(true)
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingReadingField("gas_level"));

        let err = SensorReadingBuilder {
            fan_status: None,
            ..complete()
        }
        .build()
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingReadingField("fan_status"));
    }
}
