//! Actuator configuration parameters
//!
//! All tunable parameters for the door opener.  Values are validated with
//! [`ActuatorConfig::validate`]; out-of-range values are rejected, never
//! clamped.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// How the relay dwell is timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PulseMode {
    /// `update` sleeps for the full dwell before releasing the relay.
    /// Nothing else on the host loop runs during the pulse.
    Blocking,
    /// `update` arms a deadline and returns; the next poll at or after
    /// the deadline releases the relay.
    Deferred,
}

/// Core actuator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorConfig {
    // --- Pins ---
    /// GPIO driving the relay coil
    pub relay_gpio: i32,
    /// GPIO driving the status LED
    pub status_led_gpio: i32,
    /// Relay coil energised on a HIGH level (false for active-low boards)
    pub relay_active_high: bool,

    // --- Pulse ---
    /// How long the relay stays energised per open (milliseconds)
    pub pulse_dwell_ms: u32,
    /// Blocking or deferred dwell timing
    pub pulse_mode: PulseMode,

    // --- Timing ---
    /// Host loop poll interval (milliseconds)
    pub poll_interval_ms: u32,

    // --- Accessory information ---
    pub accessory_name: String,
    pub manufacturer: String,
    pub model: String,
}

/// Longest accessory-information string accepted by the controller.
pub const MAX_INFO_LEN: usize = 32;

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            // Pins
            relay_gpio: pins::RELAY_GPIO,
            status_led_gpio: pins::STATUS_LED_GPIO,
            relay_active_high: true,

            // Pulse
            pulse_dwell_ms: 2000,
            pulse_mode: PulseMode::Deferred,

            // Timing
            poll_interval_ms: 20, // 50 Hz

            // Accessory information
            accessory_name: "Smart Door Lock".into(),
            manufacturer: "Leejja".into(),
            model: "Relay based door opener".into(),
        }
    }
}

impl ActuatorConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<()> {
        if !(0..=pins::MAX_GPIO).contains(&self.relay_gpio) {
            return Err(Error::Config("relay_gpio out of range"));
        }
        if !(0..=pins::MAX_GPIO).contains(&self.status_led_gpio) {
            return Err(Error::Config("status_led_gpio out of range"));
        }
        if self.relay_gpio == self.status_led_gpio {
            return Err(Error::Config("relay and status LED share a GPIO"));
        }
        if [self.relay_gpio, self.status_led_gpio].contains(&pins::CONTROL_BUTTON_GPIO) {
            return Err(Error::Config("output GPIO collides with the control button"));
        }
        if !(100..=10_000).contains(&self.pulse_dwell_ms) {
            return Err(Error::Config("pulse_dwell_ms must be 100–10000"));
        }
        if !(1..=1000).contains(&self.poll_interval_ms) {
            return Err(Error::Config("poll_interval_ms must be 1–1000"));
        }
        if self.poll_interval_ms >= self.pulse_dwell_ms {
            return Err(Error::Config("poll_interval_ms must be shorter than the dwell"));
        }
        if self.accessory_name.is_empty() {
            return Err(Error::Config("accessory_name must not be empty"));
        }
        for field in [&self.accessory_name, &self.manufacturer, &self.model] {
            if field.chars().count() > MAX_INFO_LEN {
                return Err(Error::Config("accessory information longer than 32 chars"));
            }
        }
        Ok(())
    }
}
