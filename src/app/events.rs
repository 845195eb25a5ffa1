//! Outbound door events.
//!
//! The [`DoorService`](super::service::DoorService) and the actuator emit
//! these through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them.

use super::commands::LinkState;
use crate::lock::LockState;

/// Structured events emitted by the door core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    /// The service has started (carries the initial characteristic values).
    Started {
        current: LockState,
        target: LockState,
    },

    /// An open was requested and the relay was energised.
    DoorOpened { dwell_ms: u32 },

    /// The relay was released at the end of a pulse.
    PulseEnded { held_ms: u64 },

    /// The reported state was brought in line with the target.
    StateReported { current: LockState },

    /// The controller asked the accessory to identify itself.
    Identify,

    /// The host link changed.
    LinkChanged(LinkState),
}
