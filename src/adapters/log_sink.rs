//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured door events to the
//! ESP-IDF logger (which goes to UART / USB-CDC in production).

use core::fmt;

use log::info;

use crate::app::commands::LinkState;
use crate::app::events::DoorEvent;
use crate::app::ports::EventSink;
use crate::lock::LockState;

/// Adapter that logs every [`DoorEvent`] to the serial console.
pub struct LogEventSink {
    relay_gpio: i32,
}

impl LogEventSink {
    pub fn new(relay_gpio: i32) -> Self {
        Self { relay_gpio }
    }

    /// The console line for `event`, tag prefix included.
    pub fn line<'a>(&self, event: &'a DoorEvent) -> EventLine<'a> {
        EventLine {
            event,
            relay_gpio: self.relay_gpio,
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &DoorEvent) {
        info!("{}", self.line(event));
    }
}

/// One rendered log line.
pub struct EventLine<'a> {
    event: &'a DoorEvent,
    relay_gpio: i32,
}

fn label(state: LockState) -> &'static str {
    match state {
        LockState::Secured => "secured",
        LockState::Unsecured => "unsecured",
    }
}

impl fmt::Display for EventLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event {
            DoorEvent::Started { current, target } => write!(
                f,
                "START | current={} target={}",
                label(*current),
                label(*target)
            ),
            DoorEvent::DoorOpened { dwell_ms } => write!(
                f,
                "DOOR  | door is open (relay GPIO{}, dwell {}ms)",
                self.relay_gpio, dwell_ms
            ),
            DoorEvent::PulseEnded { held_ms } => {
                write!(f, "PULSE | relay released after {}ms", held_ms)
            }
            DoorEvent::StateReported { current } => {
                write!(f, "STATE | current -> {}", label(*current))
            }
            DoorEvent::Identify => f.write_str("IDENT | identify requested"),
            DoorEvent::LinkChanged(link) => {
                let s = match link {
                    LinkState::Connected => "connected",
                    LinkState::Disconnected => "disconnected",
                };
                write!(f, "LINK  | {}", s)
            }
        }
    }
}
