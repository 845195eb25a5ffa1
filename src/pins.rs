//! GPIO pin assignments for the door opener board.
//!
//! Single source of truth — the config defaults and `main()` reference
//! this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Door strike relay
// ---------------------------------------------------------------------------

/// Digital output: relay coil driving the door strike (active HIGH).
pub const RELAY_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// Digital output: single-colour status LED (on-board LED on most
/// ESP32 dev kits).
pub const STATUS_LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Control button
// ---------------------------------------------------------------------------

/// Digital input: momentary control button, active LOW with pull-up.
pub const CONTROL_BUTTON_GPIO: i32 = 13;

/// Highest GPIO number on the ESP32 family we target.
pub const MAX_GPIO: i32 = 48;
