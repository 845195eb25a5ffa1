//! Polled control button with debounce and short/long press detection.
//!
//! ## Hardware
//!
//! Active-low momentary switch with a pull-up (GPIO 13).  The host loop
//! calls `tick()` every poll interval; the driver samples the pin level
//! and runs the debounce + gesture state machine.
//!
//! ## Gesture detection
//!
//! | Gesture     | Condition                       | Event        |
//! |-------------|---------------------------------|--------------|
//! | Short press | Released before `LONG_PRESS_MS` | `ShortPress` |
//! | Long press  | Held for `LONG_PRESS_MS`        | `LongPress`  |

use embedded_hal::digital::InputPin;

use crate::error::{Error, Result};

const DEBOUNCE_MS: u64 = 50;
const LONG_PRESS_MS: u64 = 3_000;

/// Button events emitted after gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    ShortPress,
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Idle,
    DebounceWait { since_ms: u64 },
    Pressed { since_ms: u64 },
    /// Long press already reported; wait for release.
    Held,
}

pub struct ButtonDriver<P: InputPin> {
    pin: P,
    gpio: i32,
    state: GestureState,
}

impl<P: InputPin> ButtonDriver<P> {
    pub fn new(pin: P, gpio: i32) -> Self {
        Self {
            pin,
            gpio,
            state: GestureState::Idle,
        }
    }

    /// Call from the host loop at each poll.
    /// `now_ms` is the current monotonic time in milliseconds.
    /// Returns a classified gesture event, if any.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<ButtonEvent>> {
        let pressed = self
            .pin
            .is_low()
            .map_err(|_| Error::Button { gpio: self.gpio })?;

        let (next, event) = match self.state {
            GestureState::Idle if pressed => (GestureState::DebounceWait { since_ms: now_ms }, None),
            GestureState::Idle => (GestureState::Idle, None),

            GestureState::DebounceWait { .. } if !pressed => (GestureState::Idle, None),
            GestureState::DebounceWait { since_ms } => {
                if now_ms.saturating_sub(since_ms) >= DEBOUNCE_MS {
                    (GestureState::Pressed { since_ms }, None)
                } else {
                    (self.state, None)
                }
            }

            GestureState::Pressed { .. } if !pressed => {
                (GestureState::Idle, Some(ButtonEvent::ShortPress))
            }
            GestureState::Pressed { since_ms } => {
                if now_ms.saturating_sub(since_ms) >= LONG_PRESS_MS {
                    (GestureState::Held, Some(ButtonEvent::LongPress))
                } else {
                    (self.state, None)
                }
            }

            GestureState::Held if !pressed => (GestureState::Idle, None),
            GestureState::Held => (GestureState::Held, None),
        };

        self.state = next;
        Ok(event)
    }
}
