//! GPIO drivers and the status LED pattern engine.

pub mod button;
pub mod led_patterns;
pub mod relay;
pub mod status_led;
